use std::time::{Duration, Instant};

/// Minimum spacing between two quiz launches.
pub const LAUNCH_THROTTLE: Duration = Duration::from_secs(2);

pub const DEFAULT_THRESHOLD_SECS: u64 = 600;

/// Counts foreground seconds and decides when a quiz has to be shown.
///
/// The gate owns exactly one counter. It only advances on [`UsageGate::tick`]
/// while running, so the caller decides what counts as foreground time.
#[derive(Clone, Debug)]
pub struct UsageGate {
    elapsed_secs: u64,
    threshold_secs: u64,
    need_quiz: bool,
    running: bool,
    last_consumed: Option<Instant>,
}

impl UsageGate {
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            elapsed_secs: 0,
            threshold_secs: threshold_secs.max(1),
            need_quiz: false,
            running: false,
            last_consumed: None,
        }
    }

    /// Start (or restart) counting. Never creates a second counter.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pause counting. `need_quiz` is left as is.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// One second of foreground time. Returns true when this tick made a
    /// quiz due.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.threshold_secs {
            self.need_quiz = true;
            self.running = false;
            tracing::info!(elapsed = self.elapsed_secs, "usage limit reached, quiz due");
            return true;
        }
        false
    }

    /// Claim the pending quiz. Clears the flag before the caller shows
    /// anything, so a second resume in quick succession finds nothing.
    pub fn try_consume(&mut self, now: Instant, navigating: bool, quiz_shown: bool) -> bool {
        if !self.need_quiz || navigating || quiz_shown {
            return false;
        }
        if let Some(last) = self.last_consumed {
            if now.saturating_duration_since(last) < LAUNCH_THROTTLE {
                return false;
            }
        }
        self.need_quiz = false;
        self.last_consumed = Some(now);
        tracing::debug!("quiz launch claimed");
        true
    }

    /// Put the flag back after a launch that could not go ahead.
    pub fn rearm(&mut self) {
        self.need_quiz = true;
    }

    pub fn on_round_finished(&mut self, success: bool) {
        self.need_quiz = false;
        if success {
            self.elapsed_secs = 0;
            self.start();
        } else {
            self.stop();
        }
    }

    /// Coming back to the foreground after a failed or abandoned round makes
    /// the quiz due again. The counter itself stays stopped.
    pub fn on_foreground(&mut self) {
        if !self.running && self.elapsed_secs >= self.threshold_secs {
            self.need_quiz = true;
        }
    }

    pub fn set_threshold(&mut self, secs: u64) {
        self.threshold_secs = secs.max(1);
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn threshold_secs(&self) -> u64 {
        self.threshold_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.threshold_secs.saturating_sub(self.elapsed_secs)
    }

    pub fn need_quiz(&self) -> bool {
        self.need_quiz
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for UsageGate {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due_gate() -> UsageGate {
        let mut gate = UsageGate::new(3);
        gate.start();
        gate.tick();
        gate.tick();
        assert!(gate.tick());
        gate
    }

    #[test]
    fn becomes_due_at_threshold_and_stops() {
        let mut gate = UsageGate::new(3);
        gate.start();
        assert!(!gate.tick());
        assert!(!gate.tick());
        assert!(gate.tick());
        assert!(gate.need_quiz());
        assert!(!gate.is_running());
        assert!(!gate.tick());
        assert_eq!(gate.elapsed_secs(), 3);
    }

    #[test]
    fn ticks_ignored_while_stopped() {
        let mut gate = UsageGate::new(10);
        gate.tick();
        gate.start();
        gate.tick();
        gate.stop();
        gate.tick();
        assert_eq!(gate.elapsed_secs(), 1);
    }

    #[test]
    fn repeated_start_keeps_single_counter() {
        let mut gate = UsageGate::new(10);
        gate.start();
        gate.start();
        gate.tick();
        assert_eq!(gate.elapsed_secs(), 1);
    }

    #[test]
    fn stop_keeps_pending_quiz() {
        let mut gate = due_gate();
        gate.stop();
        assert!(gate.need_quiz());
    }

    #[test]
    fn consume_respects_guards() {
        let now = Instant::now();
        let mut gate = due_gate();
        assert!(!gate.try_consume(now, true, false));
        assert!(!gate.try_consume(now, false, true));
        assert!(gate.need_quiz());
        assert!(gate.try_consume(now, false, false));
        assert!(!gate.need_quiz());
        assert!(!gate.try_consume(now, false, false));
    }

    #[test]
    fn consume_is_throttled() {
        let now = Instant::now();
        let mut gate = due_gate();
        assert!(gate.try_consume(now, false, false));
        gate.rearm();
        assert!(!gate.try_consume(now + Duration::from_millis(1500), false, false));
        assert!(gate.need_quiz());
        assert!(gate.try_consume(now + Duration::from_secs(2), false, false));
    }

    #[test]
    fn success_resets_and_restarts() {
        let now = Instant::now();
        let mut gate = due_gate();
        gate.try_consume(now, false, false);
        gate.on_round_finished(true);
        assert_eq!(gate.elapsed_secs(), 0);
        assert!(gate.is_running());
        assert!(!gate.need_quiz());
    }

    #[test]
    fn failure_leaves_gate_stopped() {
        let mut gate = due_gate();
        gate.on_round_finished(false);
        assert!(!gate.need_quiz());
        assert!(!gate.is_running());
        assert_eq!(gate.elapsed_secs(), 3);
    }

    #[test]
    fn foreground_after_failure_makes_quiz_due_again() {
        let mut gate = due_gate();
        gate.on_round_finished(false);
        gate.on_foreground();
        assert!(gate.need_quiz());

        let mut fresh = UsageGate::new(10);
        fresh.start();
        fresh.tick();
        fresh.stop();
        fresh.on_foreground();
        assert!(!fresh.need_quiz());
    }
}
