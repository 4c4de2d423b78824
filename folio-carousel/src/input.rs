//! Input events fed to the carousel and how they were handled.

/// A wheel or trackpad scroll step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelEvent {
    /// Horizontal delta in pixels.
    pub delta_x: f32,
    /// Vertical delta in pixels, positive when scrolling down.
    pub delta_y: f32,
}

impl WheelEvent {
    /// Vertical-only wheel step.
    pub fn vertical(delta_y: f32) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
        }
    }

    /// Whether the gesture is mostly horizontal, which browsers use for
    /// history navigation.
    pub fn is_horizontal(&self) -> bool {
        self.delta_x.abs() > self.delta_y.abs()
    }
}

/// Keys the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowUp`.
    ArrowUp,
    /// `PageDown`.
    PageDown,
    /// `PageUp`.
    PageUp,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "PageDown" => Self::PageDown,
            "PageUp" => Self::PageUp,
            _ => Self::Other,
        }
    }
}

/// Any input the carousel listens to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Wheel step on the container.
    Wheel(WheelEvent),
    /// First touch point went down at `y`.
    TouchStart {
        /// Client Y of the first touch point.
        y: f32,
    },
    /// First touch point moved to `y`.
    TouchMove {
        /// Client Y of the first touch point.
        y: f32,
    },
    /// Touch sequence finished.
    TouchEnd,
    /// Touch sequence was interrupted.
    TouchCancel,
    /// Key press on the window.
    KeyDown(Key),
}

impl InputEvent {
    /// Kind used to route the event to its listeners.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Wheel(_) => EventKind::Wheel,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd => EventKind::TouchEnd,
            Self::TouchCancel => EventKind::TouchCancel,
            Self::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// Listener routing key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Wheel events.
    Wheel,
    /// Touch start.
    TouchStart,
    /// Touch move.
    TouchMove,
    /// Touch end.
    TouchEnd,
    /// Touch cancel.
    TouchCancel,
    /// Key down.
    KeyDown,
}

/// What the carousel did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not for the carousel.
    Ignored,
    /// The event was consumed without any state change.
    Swallowed,
    /// The drag offset moved but no decision was made yet.
    Accumulated,
    /// The page changed to the contained index.
    Committed(usize),
    /// The drag offset was reset without changing page.
    SnappedBack,
}

/// Handling result returned to the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disposition {
    /// The host should suppress its default action (page scrolling).
    pub prevent_default: bool,
    /// Effect on the carousel.
    pub outcome: Outcome,
}

impl Disposition {
    pub(crate) fn ignored() -> Self {
        Self {
            prevent_default: false,
            outcome: Outcome::Ignored,
        }
    }

    pub(crate) fn passthrough(outcome: Outcome) -> Self {
        Self {
            prevent_default: false,
            outcome,
        }
    }

    pub(crate) fn prevented(outcome: Outcome) -> Self {
        Self {
            prevent_default: true,
            outcome,
        }
    }
}
