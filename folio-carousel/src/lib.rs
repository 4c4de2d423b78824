//! folio-carousel is a headless scroll carousel: vertical wheel, touch and
//! keyboard gestures page through full-screen slides laid out on a
//! horizontal track.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use folio_carousel::{Carousel, CarouselArgs, Outcome, WheelEvent};
//!
//! let start = Instant::now();
//! let mut carousel = Carousel::new(vec!["home", "work", "about", "contact"], CarouselArgs::default());
//!
//! // Four 40px wheel ticks cross the 140px threshold.
//! for step in 0..4 {
//!     carousel.handle_wheel(WheelEvent::vertical(40.0), start + Duration::from_millis(step * 10));
//! }
//! assert_eq!(carousel.current_index(), 1);
//! assert_eq!(carousel.track_style().transform_css(), "translateX(-25%)");
//!
//! // Gestures are dropped until the transition lock is released.
//! carousel.tick(start + Duration::from_millis(500));
//! assert_eq!(carousel.go_next(start + Duration::from_millis(510)), Outcome::Committed(2));
//! ```
//!
//! Hosts either call the `handle_*` adapters directly or install them on
//! [`EventTarget`]s through [`MountedCarousel`].

pub mod args;
pub mod carousel;
pub mod error;
pub mod gesture;
pub mod input;
pub mod listener;
pub mod policy;
pub mod prop;
pub mod slides;
pub mod source;
pub mod timer;
pub mod track;
pub mod transition;

pub use args::{CarouselArgs, CarouselDefaults, CarouselOptions};
pub use carousel::{Carousel, Phase, TickReport};
pub use error::CarouselError;
pub use input::{Disposition, EventKind, InputEvent, Key, Outcome, WheelEvent};
pub use listener::{DispatchResult, EventTarget, ListenerGuard, ListenerOptions, MountedCarousel};
pub use prop::CallbackWith;
pub use slides::{SlideContext, SlideDef, SlideSet};
pub use track::{PageStyle, TrackStyle};
pub use transition::{CubicBezier, TrackTransition};
