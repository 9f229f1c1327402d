use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::app::QuizOrigin;

pub enum AppEvent {
    Key(KeyEvent),
    /// Poll interval elapsed with no terminal input.
    Tick,
    FocusGained,
    FocusLost,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    /// Posted by a quiz session when its round ends.
    RoundFinished {
        success: bool,
        correct: usize,
        total: usize,
        origin: QuizOrigin,
    },
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                        Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                        Ok(Event::FocusGained) => Some(AppEvent::FocusGained),
                        Ok(Event::FocusLost) => Some(AppEvent::FocusLost),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if input_tx.send(ev).is_err() {
                            return;
                        }
                    }
                } else if input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    /// Handle for posting events back into the loop from app code.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Gaps longer than this are treated as a stall and count as one second.
pub const MAX_CATCH_UP: Duration = Duration::from_secs(3);

/// Turns wall-clock time into whole-second steps for the gate and countdown.
#[derive(Debug)]
pub struct SecondClock {
    last: Instant,
}

impl SecondClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds elapsed since the last call; the remainder carries over.
    /// After a suspend or similar stall the clock resyncs instead of replaying
    /// every missed second.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let gap = now.saturating_duration_since(self.last);
        if gap > MAX_CATCH_UP {
            tracing::debug!(gap_secs = gap.as_secs(), "clock stall, skipping missed seconds");
            self.last = now;
            return 1;
        }
        let mut steps = 0;
        while now.saturating_duration_since(self.last) >= Duration::from_secs(1) {
            self.last += Duration::from_secs(1);
            steps += 1;
        }
        steps
    }
}
