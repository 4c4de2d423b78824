//! Bounded virtual drag offset.
//!
//! Moving toward the next page accumulates a negative offset, moving toward
//! the previous page a positive one.

/// Paging direction implied by an input delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward `current_index + 1`.
    Next,
    /// Toward `current_index - 1`.
    Prev,
}

impl Direction {
    /// Direction of an offset change, `None` for a zero change.
    pub fn of_offset_delta(delta: f32) -> Option<Self> {
        if delta < 0.0 {
            Some(Self::Next)
        } else if delta > 0.0 {
            Some(Self::Prev)
        } else {
            None
        }
    }
}

/// Accumulates normalized deltas into a drag offset clamped to
/// `[-max_drag, max_drag]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureAccumulator {
    offset: f32,
    max_drag: f32,
}

impl GestureAccumulator {
    /// Creates an accumulator at rest.
    pub fn new(max_drag: f32) -> Self {
        Self {
            offset: 0.0,
            max_drag: max_drag.abs(),
        }
    }

    /// Current drag offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Adds an offset change and returns the new offset.
    pub fn accumulate(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            self.offset = (self.offset + delta).clamp(-self.max_drag, self.max_drag);
        }
        self.offset
    }

    /// Snaps the offset back to rest.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Whether the offset is at rest.
    pub fn is_at_rest(&self) -> bool {
        self.offset == 0.0
    }
}
