//! Construction-time configuration for [`Carousel`](crate::Carousel).

use std::time::Duration;

use derive_setters::Setters;
use tracing::warn;

use crate::{error::CarouselError, prop::CallbackWith};

/// Default tunables for the scroll carousel.
pub struct CarouselDefaults;

impl CarouselDefaults {
    /// Accumulated drag distance required to turn a page.
    pub const THRESHOLD_PX: f32 = 140.0;
    /// Duration of the page transition animation.
    pub const TRANSITION_MS: u64 = 420;
    /// Bound applied to the accumulated drag offset.
    pub const MAX_DRAG_PX: f32 = 220.0;
    /// Input silence after which an undecided gesture snaps back.
    pub const GESTURE_END_IDLE: Duration = Duration::from_millis(120);
    /// Extra time the animation lock is held past the transition.
    pub const UNLOCK_SLACK: Duration = Duration::from_millis(30);
}

/// Numeric tunables of a carousel.
///
/// These are the values hosts usually load from configuration, kept apart
/// from [`CarouselArgs`] so they can be deserialized and validated on their
/// own.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    /// How far the user must virtually scroll before the page changes.
    pub threshold_px: f32,
    /// Page transition duration in milliseconds.
    pub transition_ms: u64,
    /// Clamp for the drag offset.
    pub max_drag_px: f32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            threshold_px: CarouselDefaults::THRESHOLD_PX,
            transition_ms: CarouselDefaults::TRANSITION_MS,
            max_drag_px: CarouselDefaults::MAX_DRAG_PX,
        }
    }
}

impl CarouselOptions {
    /// Checks that every tunable is usable.
    pub fn validate(&self) -> Result<(), CarouselError> {
        check_positive("threshold_px", self.threshold_px)?;
        check_positive("max_drag_px", self.max_drag_px)?;
        if self.threshold_px > self.max_drag_px {
            return Err(CarouselError::ThresholdUnreachable {
                threshold_px: self.threshold_px,
                max_drag_px: self.max_drag_px,
            });
        }
        Ok(())
    }

    /// Replaces unusable values with their defaults.
    pub(crate) fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut options = self;
        if check_positive("threshold_px", options.threshold_px).is_err() {
            warn!(value = options.threshold_px, "invalid threshold_px, using default");
            options.threshold_px = defaults.threshold_px;
        }
        if check_positive("max_drag_px", options.max_drag_px).is_err() {
            warn!(value = options.max_drag_px, "invalid max_drag_px, using default");
            options.max_drag_px = defaults.max_drag_px;
        }
        if options.threshold_px > options.max_drag_px {
            warn!(
                threshold_px = options.threshold_px,
                max_drag_px = options.max_drag_px,
                "threshold exceeds drag bound; gestures will never commit"
            );
        }
        options
    }

    /// Transition duration as a [`Duration`].
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// How long the animation lock is held after a commit.
    pub fn lock_duration(&self) -> Duration {
        self.transition() + CarouselDefaults::UNLOCK_SLACK
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), CarouselError> {
    if !value.is_finite() {
        return Err(CarouselError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(CarouselError::NotPositive { field, value });
    }
    Ok(())
}

/// Arguments for constructing a [`Carousel`](crate::Carousel).
#[derive(Clone, Debug, Default, Setters)]
pub struct CarouselArgs {
    /// Starting page when the carousel owns its index.
    pub initial_index: usize,
    /// When set, the owner is the source of truth for the current page.
    #[setters(strip_option)]
    pub controlled_index: Option<usize>,
    /// Numeric tunables.
    pub options: CarouselOptions,
    /// Called once per committed page change that the owner did not request.
    #[setters(skip)]
    pub on_index_change: Option<CallbackWith<usize>>,
}

impl CarouselArgs {
    /// Sets the page change notification.
    pub fn on_index_change<F>(mut self, on_index_change: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_index_change = Some(CallbackWith::new(on_index_change));
        self
    }

    /// Sets the commit threshold in pixels.
    pub fn threshold_px(mut self, threshold_px: f32) -> Self {
        self.options.threshold_px = threshold_px;
        self
    }

    /// Sets the transition duration in milliseconds.
    pub fn transition_ms(mut self, transition_ms: u64) -> Self {
        self.options.transition_ms = transition_ms;
        self
    }

    /// Sets the drag offset bound in pixels.
    pub fn max_drag_px(mut self, max_drag_px: f32) -> Self {
        self.options.max_drag_px = max_drag_px;
        self
    }
}
