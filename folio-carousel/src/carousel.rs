//! The scroll carousel component.
//!
//! [`Carousel`] turns vertical wheel, touch and keyboard input into discrete
//! horizontal page transitions. Continuous deltas accumulate into a bounded
//! drag offset; crossing the threshold commits one page, silence snaps the
//! offset back, and every transition holds an animation lock that drops
//! gesture commits until it is released.
//!
//! The carousel never reads a clock. Every entry point takes the current
//! [`Instant`] and hosts call [`Carousel::tick`] (ideally at
//! [`Carousel::next_deadline`]) so pending timers can fire.

use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    args::{CarouselArgs, CarouselDefaults, CarouselOptions},
    gesture::{Direction, GestureAccumulator},
    input::{Disposition, InputEvent, Key, Outcome, WheelEvent},
    policy::{self, Decision, Neighbours},
    prop::CallbackWith,
    source::IndexSource,
    timer::{self, Timer},
    track::{self, PageStyle, TrackStyle},
    transition::TransitionDriver,
};

/// Observable state of the gesture machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// At rest on the current page.
    Idle,
    /// A gesture is building up offset.
    Accumulating,
    /// A transition holds the animation lock.
    Animating,
    /// [`Carousel::dispose`] has run.
    Disposed,
}

/// What fired during a [`Carousel::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The animation lock was released.
    pub unlocked: bool,
    /// An undecided gesture went silent and snapped back.
    pub snapped_back: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TouchTrack {
    start_y: f32,
    last_y: f32,
}

/// Gesture-driven horizontal pager over a fixed set of pages.
pub struct Carousel<P> {
    pages: Vec<P>,
    source: IndexSource,
    options: CarouselOptions,
    gesture: GestureAccumulator,
    gesture_end: Timer,
    transition: TransitionDriver,
    touch: Option<TouchTrack>,
    on_index_change: Option<CallbackWith<usize>>,
    disposed: bool,
}

impl<P> Carousel<P> {
    /// Creates a carousel over `pages`.
    ///
    /// In controlled mode the owner's index is mirrored straight away, with
    /// no mount transition.
    pub fn new(pages: Vec<P>, args: CarouselArgs) -> Self {
        let options = args.options.sanitized();
        let count = pages.len();
        let source = match args.controlled_index {
            Some(index) => IndexSource::external(clamp_index(index, count)),
            None => IndexSource::internal(clamp_index(args.initial_index, count)),
        };
        debug!(
            page_count = count,
            index = source.current(),
            controlled = source.is_controlled(),
            "carousel created"
        );
        Self {
            pages,
            source,
            options,
            gesture: GestureAccumulator::new(options.max_drag_px),
            gesture_end: Timer::new(),
            transition: TransitionDriver::new(options.transition(), options.lock_duration()),
            touch: None,
            on_index_change: args.on_index_change,
            disposed: false,
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in order.
    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    /// Current page index, always within the page set.
    pub fn current_index(&self) -> usize {
        self.source.current()
    }

    /// Page at the viewport origin.
    pub fn current_page(&self) -> Option<&P> {
        self.pages.get(self.current_index())
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.neighbours().next
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.neighbours().prev
    }

    /// Accumulated drag offset of the current gesture.
    pub fn drag_offset(&self) -> f32 {
        self.gesture.offset()
    }

    /// Whether the animation lock is held.
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    /// Whether an external owner drives the index.
    pub fn is_controlled(&self) -> bool {
        self.source.is_controlled()
    }

    /// Tunables in effect.
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Current state of the gesture machine.
    pub fn phase(&self) -> Phase {
        if self.disposed {
            Phase::Disposed
        } else if self.transition.is_animating() {
            Phase::Animating
        } else if !self.gesture.is_at_rest() || self.gesture_end.is_armed() {
            Phase::Accumulating
        } else {
            Phase::Idle
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.disposed {
            return None;
        }
        timer::earliest(self.gesture_end.deadline(), self.transition.unlock_deadline())
    }

    /// Linear progress of the running transition, `1.0` when settled.
    pub fn transition_progress(&self, now: Instant) -> f32 {
        self.transition.progress(now)
    }

    /// Track style at rest on the current page, carrying the eased
    /// transition while the lock is held.
    pub fn track_style(&self) -> TrackStyle {
        TrackStyle::new(
            self.current_index(),
            self.page_count(),
            self.transition.track_transition(),
        )
    }

    /// Track translation at `now` for hosts that paint the animation
    /// themselves.
    pub fn visual_translate_percent(&self, now: Instant) -> f32 {
        let resting = track::translate_percent(self.current_index(), self.page_count());
        self.transition.translate_at(now, resting)
    }

    /// Section styles for every page.
    pub fn page_styles(&self) -> impl Iterator<Item = PageStyle> {
        track::page_styles(self.current_index(), self.page_count())
    }

    /// Requests `index`, clamped to the page set.
    ///
    /// Requesting the current page only snaps back a pending drag. This is
    /// a programmatic request and is not held back by the animation lock.
    pub fn set_index(&mut self, index: usize, now: Instant) -> Outcome {
        if self.disposed {
            return Outcome::Ignored;
        }
        self.commit_to(index, now, true)
    }

    /// Requests the next page, subject to the animation lock.
    pub fn go_next(&mut self, now: Instant) -> Outcome {
        self.step(Direction::Next, now)
    }

    /// Requests the previous page, subject to the animation lock.
    pub fn go_prev(&mut self, now: Instant) -> Outcome {
        self.step(Direction::Prev, now)
    }

    /// Mirrors the owner's index on every owner render.
    ///
    /// A value different from the mirrored index runs the same animated
    /// transition as a commit but is not reported back through
    /// `on_index_change`. `None` returns the carousel to uncontrolled mode.
    pub fn sync_controlled(&mut self, controlled_index: Option<usize>, now: Instant) -> Outcome {
        if self.disposed {
            return Outcome::Ignored;
        }
        let requested = controlled_index.map(|index| clamp_index(index, self.page_count()));
        match self.source.offer(requested) {
            Some(target) => self.commit_to(target, now, false),
            None => Outcome::Ignored,
        }
    }

    /// Routes an input event to its adapter.
    pub fn dispatch(&mut self, event: &InputEvent, now: Instant) -> Disposition {
        match *event {
            InputEvent::Wheel(wheel) => self.handle_wheel(wheel, now),
            InputEvent::TouchStart { y } => self.handle_touch_start(y),
            InputEvent::TouchMove { y } => self.handle_touch_move(y, now),
            InputEvent::TouchEnd | InputEvent::TouchCancel => self.handle_touch_end(),
            InputEvent::KeyDown(key) => self.handle_key(key, now),
        }
    }

    /// Wheel adapter. Scrolling down pulls toward the next page.
    ///
    /// With more than one page every event has its default prevented, so a
    /// mostly horizontal swipe is ignored without scrolling the page either.
    pub fn handle_wheel(&mut self, event: WheelEvent, now: Instant) -> Disposition {
        if self.disposed || self.page_count() <= 1 {
            return Disposition::ignored();
        }
        if self.transition.is_animating() {
            trace!("wheel swallowed during transition");
            return Disposition::prevented(Outcome::Swallowed);
        }
        if event.is_horizontal() {
            return Disposition::prevented(Outcome::Ignored);
        }
        if !event.delta_y.is_finite() {
            return Disposition::prevented(Outcome::Swallowed);
        }

        let delta = -event.delta_y;
        if self.blocked_at_boundary(delta) {
            trace!(delta_y = event.delta_y, "wheel swallowed at boundary");
            return Disposition::prevented(Outcome::Swallowed);
        }

        self.gesture.accumulate(delta);
        let outcome = match self.decide(now) {
            Outcome::Accumulated => {
                self.gesture_end.arm(now, CarouselDefaults::GESTURE_END_IDLE);
                Outcome::Accumulated
            }
            outcome => outcome,
        };
        Disposition::prevented(outcome)
    }

    /// Touch start adapter; begins tracking the first touch point.
    pub fn handle_touch_start(&mut self, y: f32) -> Disposition {
        if self.disposed || self.page_count() <= 1 || self.transition.is_animating() {
            return Disposition::ignored();
        }
        self.touch = Some(TouchTrack {
            start_y: y,
            last_y: y,
        });
        Disposition::passthrough(Outcome::Swallowed)
    }

    /// Touch move adapter. Moving the finger up pulls toward the next page.
    pub fn handle_touch_move(&mut self, y: f32, now: Instant) -> Disposition {
        if self.disposed || self.page_count() <= 1 || self.transition.is_animating() {
            return Disposition::ignored();
        }
        let Some(track) = self.touch.as_mut() else {
            return Disposition::ignored();
        };
        let delta = y - track.last_y;
        track.last_y = y;
        trace!(start_y = track.start_y, y, delta, "touch moved");

        if !delta.is_finite() {
            return Disposition::prevented(Outcome::Swallowed);
        }
        if self.blocked_at_boundary(delta) {
            return Disposition::prevented(Outcome::Swallowed);
        }

        self.gesture.accumulate(delta);
        Disposition::prevented(self.decide(now))
    }

    /// Touch end and cancel adapter; an undecided drag snaps back.
    pub fn handle_touch_end(&mut self) -> Disposition {
        if self.disposed {
            return Disposition::ignored();
        }
        self.touch = None;
        Disposition::passthrough(self.gesture_ended())
    }

    /// Keyboard adapter. Arrow and page keys request a page directly,
    /// bypassing the threshold.
    pub fn handle_key(&mut self, key: Key, now: Instant) -> Disposition {
        let outcome = match key {
            Key::ArrowDown | Key::PageDown => self.step(Direction::Next, now),
            Key::ArrowUp | Key::PageUp => self.step(Direction::Prev, now),
            Key::Other => Outcome::Ignored,
        };
        Disposition::passthrough(outcome)
    }

    /// Fires due timers.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        if self.disposed {
            return TickReport::default();
        }
        let mut report = TickReport::default();
        if self.transition.tick(now) {
            debug!(index = self.current_index(), "transition settled");
            report.unlocked = true;
        }
        if self.gesture_end.fire_if_due(now) {
            report.snapped_back = self.gesture_ended() == Outcome::SnappedBack;
        }
        report
    }

    /// Tears the carousel down. Every later call, including pending timer
    /// deadlines, becomes a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.gesture_end.cancel();
        self.transition.cancel();
        self.gesture.reset();
        self.touch = None;
        self.disposed = true;
        debug!("carousel disposed");
    }

    fn neighbours(&self) -> Neighbours {
        Neighbours::of(self.current_index(), self.page_count())
    }

    fn blocked_at_boundary(&self, offset_delta: f32) -> bool {
        Direction::of_offset_delta(offset_delta)
            .is_some_and(|direction| !self.neighbours().has(direction))
    }

    fn decide(&mut self, now: Instant) -> Outcome {
        let decision = policy::evaluate(
            self.gesture.offset(),
            self.options.threshold_px,
            self.neighbours(),
        );
        match decision {
            Decision::Commit(direction) => {
                let target = self.neighbour_index(direction);
                self.commit_to(target, now, true)
            }
            Decision::SnapBack => self.snap_back(),
            Decision::Undecided => Outcome::Accumulated,
        }
    }

    fn step(&mut self, direction: Direction, now: Instant) -> Outcome {
        if self.disposed {
            return Outcome::Ignored;
        }
        if self.transition.is_animating() || !self.neighbours().has(direction) {
            return Outcome::Swallowed;
        }
        let target = self.neighbour_index(direction);
        self.commit_to(target, now, true)
    }

    fn neighbour_index(&self, direction: Direction) -> usize {
        let current = self.current_index();
        match direction {
            Direction::Next => current.saturating_add(1),
            Direction::Prev => current.saturating_sub(1),
        }
    }

    fn gesture_ended(&mut self) -> Outcome {
        if self.transition.is_animating() {
            return Outcome::Swallowed;
        }
        self.snap_back()
    }

    fn snap_back(&mut self) -> Outcome {
        if !self.gesture.is_at_rest() {
            trace!(offset = self.gesture.offset(), "snapping back");
        }
        self.gesture.reset();
        self.gesture_end.cancel();
        Outcome::SnappedBack
    }

    fn commit_to(&mut self, index: usize, now: Instant, notify: bool) -> Outcome {
        let count = self.page_count();
        let target = clamp_index(index, count);
        let current = self.current_index();
        if target == current {
            return self.snap_back();
        }

        self.transition.begin(
            now,
            track::translate_percent(current, count),
            track::translate_percent(target, count),
        );
        self.gesture.reset();
        self.gesture_end.cancel();
        self.source.record_commit(target);
        debug!(from = current, to = target, notify, "page committed");

        if notify && let Some(on_index_change) = &self.on_index_change {
            on_index_change.call(target);
        }
        Outcome::Committed(target)
    }
}

impl<P> Drop for Carousel<P> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<P> std::fmt::Debug for Carousel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("page_count", &self.page_count())
            .field("current_index", &self.current_index())
            .field("drag_offset", &self.gesture.offset())
            .field("phase", &self.phase())
            .field("controlled", &self.source.is_controlled())
            .finish_non_exhaustive()
    }
}

fn clamp_index(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}
