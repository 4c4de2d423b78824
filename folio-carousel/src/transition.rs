//! Page transition timeline and the animation lock.
//!
//! A transition starts on every committed or owner-driven page change. The
//! lock it takes is released by a one-shot timer after the transition time
//! plus a small slack; input cannot shorten or extend it.

use std::time::{Duration, Instant};

use crate::timer::Timer;

/// CSS-style cubic Bézier timing curve through `(0, 0)` and `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point x, clamped to `0.0..=1.0`.
    pub x1: f32,
    /// First control point y.
    pub y1: f32,
    /// Second control point x, clamped to `0.0..=1.0`.
    pub x2: f32,
    /// Second control point y.
    pub y2: f32,
}

impl CubicBezier {
    /// The ease-out curve used for page transitions.
    pub const PAGE: Self = Self::new(0.22, 1.0, 0.36, 1.0);

    /// Creates a curve from its two control points.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased value for a linear progress `t` in `0.0..=1.0`.
    pub fn sample(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let x1 = self.x1.clamp(0.0, 1.0);
        let x2 = self.x2.clamp(0.0, 1.0);
        let s = solve_parameter(t, x1, x2);
        bezier(s, self.y1, self.y2)
    }

    /// CSS `cubic-bezier(...)` notation.
    pub fn to_css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::PAGE
    }
}

fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Finds the curve parameter whose x equals `x`.
fn solve_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < 1e-5 && (0.0..=1.0).contains(&s) {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-5 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// Transition applied to the track while the lock is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackTransition {
    /// Animation duration.
    pub duration: Duration,
    /// Timing curve.
    pub easing: CubicBezier,
}

impl TrackTransition {
    /// CSS `transition` value for the track transform.
    pub fn to_css(&self) -> String {
        format!(
            "transform {}ms {}",
            self.duration.as_millis(),
            self.easing.to_css()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Timeline {
    started_at: Instant,
    from: f32,
    to: f32,
}

/// Drives the animated transform and owns the animation lock.
#[derive(Clone, Debug)]
pub struct TransitionDriver {
    duration: Duration,
    lock_duration: Duration,
    easing: CubicBezier,
    unlock: Timer,
    timeline: Option<Timeline>,
}

impl TransitionDriver {
    /// Creates an idle driver.
    pub fn new(duration: Duration, lock_duration: Duration) -> Self {
        Self {
            duration,
            lock_duration,
            easing: CubicBezier::PAGE,
            unlock: Timer::new(),
            timeline: None,
        }
    }

    /// Whether the animation lock is held.
    pub fn is_animating(&self) -> bool {
        self.unlock.is_armed()
    }

    /// When the lock will be released.
    pub fn unlock_deadline(&self) -> Option<Instant> {
        self.unlock.deadline()
    }

    /// Begins a transition of the track translation from `from` to `to`
    /// percent.
    ///
    /// When a transition is already running the visual timeline restarts
    /// from wherever the track currently is, but the pending unlock keeps
    /// its original deadline.
    pub fn begin(&mut self, now: Instant, from: f32, to: f32) {
        let from = match self.timeline {
            Some(_) if self.is_animating() => self.translate_at(now, from),
            _ => from,
        };
        self.timeline = Some(Timeline {
            started_at: now,
            from,
            to,
        });
        if !self.unlock.is_armed() {
            self.unlock.arm(now, self.lock_duration);
        }
    }

    /// Releases the lock once its deadline passes, returning `true` when it
    /// did so during this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.unlock.fire_if_due(now) {
            self.timeline = None;
            return true;
        }
        false
    }

    /// Drops the lock and timeline without waiting.
    pub fn cancel(&mut self) {
        self.unlock.cancel();
        self.timeline = None;
    }

    /// Linear progress of the running transition, `1.0` when settled.
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(timeline) = self.timeline else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(timeline.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress of the running transition.
    pub fn eased_progress(&self, now: Instant) -> f32 {
        self.easing.sample(self.progress(now))
    }

    /// Track translation at `now`, or `resting` when no transition runs.
    pub fn translate_at(&self, now: Instant, resting: f32) -> f32 {
        match self.timeline {
            Some(timeline) => {
                let eased = self.eased_progress(now);
                timeline.from + (timeline.to - timeline.from) * eased
            }
            None => resting,
        }
    }

    /// Transition to apply to the track, present only while locked.
    pub fn track_transition(&self) -> Option<TrackTransition> {
        self.is_animating().then_some(TrackTransition {
            duration: self.duration,
            easing: self.easing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> TransitionDriver {
        TransitionDriver::new(Duration::from_millis(420), Duration::from_millis(450))
    }

    #[test]
    fn bezier_endpoints_and_monotonicity() {
        let curve = CubicBezier::PAGE;
        assert_eq!(curve.sample(0.0), 0.0);
        assert_eq!(curve.sample(1.0), 1.0);
        let mut last = 0.0;
        for step in 1..=20 {
            let value = curve.sample(step as f32 / 20.0);
            assert!(value >= last - 1e-4, "curve decreased at step {step}");
            last = value;
        }
    }

    #[test]
    fn linear_curve_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            assert!((linear.sample(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        assert!(CubicBezier::PAGE.sample(0.5) > 0.5);
    }

    #[test]
    fn lock_releases_after_transition_and_slack() {
        let start = Instant::now();
        let mut driver = driver();
        driver.begin(start, 0.0, -25.0);

        assert!(driver.is_animating());
        assert!(driver.track_transition().is_some());
        assert!(!driver.tick(start + Duration::from_millis(449)));
        assert!(driver.tick(start + Duration::from_millis(450)));
        assert!(!driver.is_animating());
        assert_eq!(driver.track_transition(), None);
    }

    #[test]
    fn retarget_keeps_original_unlock() {
        let start = Instant::now();
        let mut driver = driver();
        driver.begin(start, 0.0, -25.0);
        driver.begin(start + Duration::from_millis(200), -25.0, -75.0);

        assert_eq!(
            driver.unlock_deadline(),
            Some(start + Duration::from_millis(450))
        );
    }

    #[test]
    fn translation_interpolates_between_pages() {
        let start = Instant::now();
        let mut driver = driver();
        driver.begin(start, 0.0, -25.0);

        assert_eq!(driver.translate_at(start, -25.0), 0.0);
        let mid = driver.translate_at(start + Duration::from_millis(210), -25.0);
        assert!(mid < 0.0 && mid > -25.0);
        let end = driver.translate_at(start + Duration::from_millis(420), -25.0);
        assert!((end + 25.0).abs() < 1e-3);
        assert_eq!(
            driver.track_transition().map(|t| t.to_css()),
            Some("transform 420ms cubic-bezier(0.22, 1, 0.36, 1)".to_string())
        );
    }
}
