use std::time::{Duration, Instant};

/// Fixed-interval refresh timer driven by the UI loop.
///
/// Ticks are checked rather than awaited so a tick never interrupts a frame;
/// a tick missed while the loop was busy fires once, not once per interval.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when a tick is due at `now`; schedules the next one.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        while due <= now {
            due += self.interval;
        }
        self.next_due = Some(due);
        true
    }
}
