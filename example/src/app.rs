//! Replays a [`Session`] against the mounted portfolio carousel.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use folio_carousel::{
    CarouselArgs, EventTarget, InputEvent, MountedCarousel, Outcome, SlideDef,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    portfolio::{SlideContent, render_frame, root_slides},
    session::{Action, Session, SessionEvent},
};

/// Totals reported once a replay finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Page changes, whoever caused them.
    pub transitions: usize,
    /// Indices reported through `on_index_change`.
    pub notifications: Vec<usize>,
    /// Slide shown at the end.
    pub final_slide: String,
}

/// The portfolio page: owner state plus the mounted carousel.
pub struct Replay {
    container: EventTarget,
    window: EventTarget,
    mounted: MountedCarousel<SlideDef<SlideContent>>,
    active: Arc<Mutex<usize>>,
    notifications: Arc<Mutex<Vec<usize>>>,
    controlled: bool,
    slide_ids: Vec<String>,
    start: Instant,
    transitions: usize,
}

impl Replay {
    /// Mounts the deck configured by `session`, with time zero at `start`.
    pub fn new(session: &Session, start: Instant) -> Result<Self> {
        let deck = root_slides();
        let initial = match &session.owner.initial_slide {
            Some(id) => deck
                .index_of(id)
                .with_context(|| format!("unknown initial slide `{id}`"))?,
            None => 0,
        };
        let slide_ids = deck.iter().map(|slide| slide.id.clone()).collect();

        let active = Arc::new(Mutex::new(initial));
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let owner_active = Arc::clone(&active);
        let owner_log = Arc::clone(&notifications);

        let mut args = CarouselArgs::default()
            .initial_index(initial)
            .options(session.carousel)
            .on_index_change(move |index| {
                *owner_active.lock() = index;
                owner_log.lock().push(index);
            });
        if session.owner.controlled {
            args = args.controlled_index(initial);
        }

        let container = EventTarget::new();
        let window = EventTarget::new();
        let mounted = MountedCarousel::mount(deck.into_carousel(args), &container, &window);
        info!(
            initial,
            controlled = session.owner.controlled,
            listeners = mounted.listener_count(),
            "portfolio mounted"
        );

        Ok(Self {
            container,
            window,
            mounted,
            active,
            notifications,
            controlled: session.owner.controlled,
            slide_ids,
            start,
            transitions: 0,
        })
    }

    /// Current slide index.
    pub fn current_index(&self) -> usize {
        self.mounted.with(|carousel| carousel.current_index())
    }

    /// Replays `events`, handing a rendered frame to `on_frame` after every
    /// page change.
    pub fn run(
        mut self,
        events: &[SessionEvent],
        mut on_frame: impl FnMut(&str),
    ) -> ReplaySummary {
        let first = self.mounted.with(|carousel| render_frame(carousel, self.start));
        on_frame(&first);

        for event in events {
            let now = self.start + Duration::from_millis(event.at_ms);
            self.advance_to(now);
            let outcome = self.apply(&event.action, now);
            debug!(at_ms = event.at_ms, action = ?event.action, ?outcome, "event replayed");
            self.render_owner(now);

            if let Outcome::Committed(index) = outcome {
                self.transitions += 1;
                info!(at_ms = event.at_ms, slide = %self.slide_ids[index], "slide changed");
                let frame = self.mounted.with(|carousel| render_frame(carousel, now));
                on_frame(&frame);
            }
        }

        if let Some(last) = events.last() {
            let settle = self.start + Duration::from_millis(last.at_ms) + Duration::from_secs(1);
            self.advance_to(settle);
        }

        let final_index = self.current_index();
        ReplaySummary {
            transitions: self.transitions,
            notifications: self.notifications.lock().clone(),
            final_slide: self.slide_ids[final_index].clone(),
        }
    }

    /// Fires every timer due up to `now`, each at its own deadline.
    fn advance_to(&self, now: Instant) {
        while let Some(deadline) = self
            .mounted
            .with(|carousel| carousel.next_deadline())
            .filter(|deadline| *deadline <= now)
        {
            let report = self.mounted.tick(deadline);
            if report.snapped_back {
                debug!("gesture went silent, snapped back");
            }
        }
    }

    fn apply(&mut self, action: &Action, now: Instant) -> Outcome {
        if let Some(input) = action.input_event() {
            return self.dispatch(&input, now);
        }
        match action {
            Action::Navigate { slide } => {
                let Some(index) = self.slide_ids.iter().position(|id| id == slide) else {
                    warn!(%slide, "navigation to unknown slide ignored");
                    return Outcome::Ignored;
                };
                if self.controlled {
                    *self.active.lock() = index;
                    self.sync(now)
                } else {
                    self.mounted.with_mut(|carousel| carousel.set_index(index, now))
                }
            }
            Action::Next => self.mounted.with_mut(|carousel| {
                let context = carousel.slide_context(carousel.current_index());
                context.request_next(carousel, now)
            }),
            _ => Outcome::Ignored,
        }
    }

    fn dispatch(&self, input: &InputEvent, now: Instant) -> Outcome {
        let target = match input {
            InputEvent::KeyDown(_) => &self.window,
            _ => &self.container,
        };
        let result = target.dispatch(input, now);
        if result.default_prevented {
            debug!(kind = ?input.kind(), "default action prevented");
        }
        result
            .outcomes
            .into_iter()
            .next()
            .unwrap_or(Outcome::Ignored)
    }

    /// The owner re-renders and hands its index to the carousel.
    fn render_owner(&mut self, now: Instant) {
        if !self.controlled {
            return;
        }
        if let Outcome::Committed(index) = self.sync(now) {
            debug!(index, "owner-driven transition during render");
        }
    }

    fn sync(&self, now: Instant) -> Outcome {
        let active = *self.active.lock();
        self.mounted
            .with_mut(|carousel| carousel.sync_controlled(Some(active), now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_SESSION;

    fn replay(text: &str) -> ReplaySummary {
        let session = Session::parse(text).expect("valid session");
        let replay = Replay::new(&session, Instant::now()).expect("mounts");
        replay.run(&session.events, |_| {})
    }

    #[test]
    fn bundled_tour_visits_every_slide() {
        let mut frames = Vec::new();
        let session = Session::parse(DEFAULT_SESSION).expect("valid session");
        let summary = Replay::new(&session, Instant::now())
            .expect("mounts")
            .run(&session.events, |frame| frames.push(frame.to_string()));

        // wheel → work, touch → about, ArrowUp → work, next → about,
        // nav → home, nav → contact.
        assert_eq!(summary.transitions, 6);
        assert_eq!(summary.notifications, vec![1, 2, 1, 2]);
        assert_eq!(summary.final_slide, "contact");
        assert_eq!(frames.len(), 7);
    }

    #[test]
    fn nav_jump_in_controlled_mode_is_not_echoed() {
        let summary = replay(
            r#"
            [owner]
            controlled = true
            initial_slide = "work"

            [[events]]
            at_ms = 0
            action = { kind = "navigate", slide = "contact" }
            "#,
        );
        assert_eq!(summary.transitions, 1);
        assert!(summary.notifications.is_empty());
        assert_eq!(summary.final_slide, "contact");
    }

    #[test]
    fn uncontrolled_nav_reports_the_change() {
        let summary = replay(
            r#"
            [owner]
            controlled = false

            [[events]]
            at_ms = 0
            action = { kind = "navigate", slide = "about" }
            "#,
        );
        assert_eq!(summary.notifications, vec![2]);
        assert_eq!(summary.final_slide, "about");
    }

    #[test]
    fn hesitant_scroll_stays_put() {
        let summary = replay(
            r#"
            [[events]]
            at_ms = 0
            action = { kind = "wheel", dy = 40.0 }

            [[events]]
            at_ms = 10
            action = { kind = "wheel", dy = 40.0 }

            [[events]]
            at_ms = 140
            action = { kind = "wheel", dy = 40.0 }

            [[events]]
            at_ms = 150
            action = { kind = "wheel", dy = 40.0 }
            "#,
        );
        assert_eq!(summary.transitions, 0);
        assert_eq!(summary.final_slide, "home");
    }

    #[test]
    fn unknown_initial_slide_is_an_error() {
        let session = Session::parse("[owner]\ninitial_slide = \"blog\"\n").expect("parses");
        assert!(Replay::new(&session, Instant::now()).is_err());
    }
}
