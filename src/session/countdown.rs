/// Per-question countdown driven by one-second ticks.
///
/// There is only ever one countdown per session: `start` replaces whatever
/// was running. `pause` cancels ticking but keeps the remaining seconds so
/// `resume` can pick up where it stopped.
#[derive(Clone, Debug, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the tick had no effect.
    Idle,
    Running(u32),
    Expired,
}

impl Countdown {
    pub fn start(&mut self, secs: u32) {
        self.remaining = secs;
        self.running = secs > 0;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resume a paused countdown. Returns false when already running or
    /// there is no time left.
    pub fn resume(&mut self) -> bool {
        if self.running || self.remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_then_expires_once() {
        let mut c = Countdown::default();
        c.start(2);
        assert_eq!(c.tick(), TickOutcome::Running(1));
        assert_eq!(c.tick(), TickOutcome::Expired);
        assert_eq!(c.tick(), TickOutcome::Idle);
        assert!(!c.resume());
    }

    #[test]
    fn pause_keeps_remaining() {
        let mut c = Countdown::default();
        c.start(10);
        c.tick();
        c.pause();
        assert_eq!(c.tick(), TickOutcome::Idle);
        assert_eq!(c.remaining(), 9);
        assert!(c.resume());
        assert!(!c.resume());
        assert_eq!(c.tick(), TickOutcome::Running(8));
    }

    #[test]
    fn start_replaces_previous() {
        let mut c = Countdown::default();
        c.start(3);
        c.tick();
        c.start(30);
        assert_eq!(c.remaining(), 30);
        assert!(c.is_running());
    }
}
