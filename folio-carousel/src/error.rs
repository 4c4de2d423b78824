//! Errors reported while validating carousel options.
//!
//! Runtime navigation never fails; out-of-range requests are clamped. Only
//! the construction-time tunables can be rejected.

use thiserror::Error;

/// Reasons a [`CarouselOptions`](crate::args::CarouselOptions) value is
/// rejected by [`validate`](crate::args::CarouselOptions::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    /// A pixel or duration tunable is NaN or infinite.
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite {
        /// Name of the offending option.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A pixel tunable is zero or negative.
    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive {
        /// Name of the offending option.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The commit threshold can never be reached because the drag offset is
    /// clamped below it.
    #[error("threshold ({threshold_px}px) exceeds the drag bound ({max_drag_px}px)")]
    ThresholdUnreachable {
        /// Configured commit threshold.
        threshold_px: f32,
        /// Configured drag bound.
        max_drag_px: f32,
    },
}
