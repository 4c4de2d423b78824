//! One-shot deadline timers driven by the host clock.
//!
//! The carousel never sleeps or spawns. A timer only records when it is due
//! and the owner polls it from [`Carousel::tick`](crate::Carousel::tick), so
//! a timer dropped together with its owner can never fire late.

use std::time::{Duration, Instant};

/// A cancellable one-shot timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Creates an idle timer.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the timer to fire `after` from `now`, replacing any pending
    /// deadline.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Clears the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarms and returns `true` when the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of two optional deadlines.
pub(crate) fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, Duration::from_millis(120));

        assert!(!timer.fire_if_due(start + Duration::from_millis(119)));
        assert!(timer.fire_if_due(start + Duration::from_millis(120)));
        assert!(!timer.fire_if_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn rearming_pushes_the_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, Duration::from_millis(120));
        timer.arm(start + Duration::from_millis(100), Duration::from_millis(120));

        assert!(!timer.fire_if_due(start + Duration::from_millis(150)));
        assert!(timer.fire_if_due(start + Duration::from_millis(220)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, Duration::ZERO);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.fire_if_due(start + Duration::from_secs(1)));
    }
}
