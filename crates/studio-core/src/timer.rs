//! Deadline timers polled from the frame loop.
//!
//! A [`TimerSlot`] holds at most one pending deadline. Scheduling again
//! replaces the previous deadline instead of stacking a second one, and
//! [`TimerSlot::fire`] consumes the deadline exactly once.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerSlot {
    deadline_ms: Option<f64>,
}

impl TimerSlot {
    pub const fn idle() -> Self {
        Self { deadline_ms: None }
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// Returns true (and clears the slot) when the deadline has passed.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(t) if now_ms >= t => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
