//! Scripted input sessions.
//!
//! A session file configures the carousel and lists timed input events:
//!
//! ```toml
//! [carousel]
//! threshold_px = 140.0
//!
//! [owner]
//! controlled = true
//! initial_slide = "home"
//!
//! [[events]]
//! at_ms = 0
//! action = { kind = "wheel", dy = 40.0 }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use folio_carousel::{CarouselOptions, InputEvent, Key, WheelEvent};
use serde::Deserialize;

/// Session replayed when no script is given.
pub const DEFAULT_SESSION: &str = include_str!("../sessions/tour.toml");

/// How the page owning the carousel behaves.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OwnerConfig {
    /// Drive the carousel as a controlled component.
    pub controlled: bool,
    /// Slide id shown first.
    pub initial_slide: Option<String>,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            controlled: true,
            initial_slide: None,
        }
    }
}

/// One timed step of a session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SessionEvent {
    /// Milliseconds since the session started.
    pub at_ms: u64,
    /// What happens at that time.
    pub action: Action,
}

/// Input or owner action.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Wheel step on the carousel.
    Wheel {
        /// Horizontal delta.
        #[serde(default)]
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Finger down.
    TouchStart {
        /// Client Y.
        y: f32,
    },
    /// Finger moved.
    TouchMove {
        /// Client Y.
        y: f32,
    },
    /// Finger up.
    TouchEnd,
    /// Touch interrupted.
    TouchCancel,
    /// Key press, named like `KeyboardEvent.key`.
    Key {
        /// Key name.
        key: String,
    },
    /// Nav bar click on the slide with this id.
    Navigate {
        /// Slide id.
        slide: String,
    },
    /// "Next slide" button on the current slide.
    Next,
    /// Only lets time pass.
    Wait,
}

impl Action {
    /// The carousel input this action stands for, if any.
    pub fn input_event(&self) -> Option<InputEvent> {
        match self {
            Self::Wheel { dx, dy } => Some(InputEvent::Wheel(WheelEvent {
                delta_x: *dx,
                delta_y: *dy,
            })),
            Self::TouchStart { y } => Some(InputEvent::TouchStart { y: *y }),
            Self::TouchMove { y } => Some(InputEvent::TouchMove { y: *y }),
            Self::TouchEnd => Some(InputEvent::TouchEnd),
            Self::TouchCancel => Some(InputEvent::TouchCancel),
            Self::Key { key } => Some(InputEvent::KeyDown(Key::from_name(key))),
            Self::Navigate { .. } | Self::Next | Self::Wait => None,
        }
    }
}

/// A parsed session file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Session {
    /// Carousel tunables.
    pub carousel: CarouselOptions,
    /// Owner behaviour.
    pub owner: OwnerConfig,
    /// Timed events, replayed in `at_ms` order.
    pub events: Vec<SessionEvent>,
}

impl Session {
    /// Parses a session from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let session: Session = toml::from_str(text).context("invalid session file")?;
        session.carousel.validate().context("invalid [carousel] options")?;
        if session.events.windows(2).any(|pair| pair[1].at_ms < pair[0].at_ms) {
            bail!("session events must be listed in `at_ms` order");
        }
        Ok(session)
    }

    /// Reads and parses a session file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to load {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_parses() {
        let session = Session::parse(DEFAULT_SESSION).expect("bundled session is valid");
        assert!(!session.events.is_empty());
        assert!(session.owner.controlled);
    }

    #[test]
    fn parses_every_action_kind() {
        let session = Session::parse(
            r#"
            [[events]]
            at_ms = 0
            action = { kind = "wheel", dy = 40.0 }

            [[events]]
            at_ms = 5
            action = { kind = "touch_start", y = 300.0 }

            [[events]]
            at_ms = 6
            action = { kind = "touch_move", y = 250.0 }

            [[events]]
            at_ms = 7
            action = { kind = "touch_end" }

            [[events]]
            at_ms = 8
            action = { kind = "key", key = "PageDown" }

            [[events]]
            at_ms = 9
            action = { kind = "navigate", slide = "about" }

            [[events]]
            at_ms = 10
            action = { kind = "next" }

            [[events]]
            at_ms = 11
            action = { kind = "wait" }
            "#,
        )
        .expect("valid session");

        assert_eq!(session.carousel, CarouselOptions::default());
        assert_eq!(session.events.len(), 8);
        assert_eq!(
            session.events[0].action.input_event(),
            Some(InputEvent::Wheel(WheelEvent::vertical(40.0)))
        );
        assert_eq!(
            session.events[4].action.input_event(),
            Some(InputEvent::KeyDown(Key::PageDown))
        );
        assert_eq!(session.events[5].action.input_event(), None);
    }

    #[test]
    fn rejects_invalid_options() {
        let error = Session::parse("[carousel]\nthreshold_px = 400.0\n").unwrap_err();
        assert!(format!("{error:#}").contains("exceeds the drag bound"));
    }

    #[test]
    fn rejects_out_of_order_events() {
        let error = Session::parse(
            r#"
            [[events]]
            at_ms = 10
            action = { kind = "wait" }

            [[events]]
            at_ms = 5
            action = { kind = "wait" }
            "#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("at_ms"));
    }
}
