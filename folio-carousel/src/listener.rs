//! Scoped input listeners.
//!
//! An [`EventTarget`] stands in for a host element (the carousel container
//! or the window). Adding a listener returns a [`ListenerGuard`] that
//! removes it again when dropped, so a mounted carousel can never leave a
//! listener behind on any exit path.

use std::{
    sync::{Arc, Weak},
    time::Instant,
};

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    carousel::{Carousel, TickReport},
    input::{Disposition, EventKind, InputEvent, Outcome},
};

/// Options for [`EventTarget::add_listener`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// A passive listener cannot suppress the default action.
    pub passive: bool,
}

impl ListenerOptions {
    /// Listener that may prevent the default action.
    pub const ACTIVE: Self = Self { passive: false };
    /// Listener whose `prevent_default` requests are ignored.
    pub const PASSIVE: Self = Self { passive: true };
}

type Handler = Box<dyn FnMut(&InputEvent, Instant) -> Disposition + Send>;

struct Entry {
    id: u64,
    kind: EventKind,
    options: ListenerOptions,
    handler: Handler,
}

#[derive(Default)]
struct TargetInner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Result of dispatching one event to a target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// A non-passive listener asked to suppress the default action.
    pub default_prevented: bool,
    /// Outcome reported by every listener that ran, in registration order.
    pub outcomes: Vec<Outcome>,
}

/// Host element that input listeners are installed on.
///
/// Handlers run while the target is locked and must not add or remove
/// listeners on the same target.
#[derive(Clone, Default)]
pub struct EventTarget {
    inner: Arc<Mutex<TargetInner>>,
}

impl EventTarget {
    /// Creates a target with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handler` for events of `kind`.
    #[must_use = "the listener is removed when the guard is dropped"]
    pub fn add_listener<F>(&self, kind: EventKind, options: ListenerOptions, handler: F) -> ListenerGuard
    where
        F: FnMut(&InputEvent, Instant) -> Disposition + Send + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            kind,
            options,
            handler: Box::new(handler),
        });
        ListenerGuard {
            target: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Delivers `event` to every listener of its kind.
    pub fn dispatch(&self, event: &InputEvent, now: Instant) -> DispatchResult {
        let kind = event.kind();
        let mut inner = self.inner.lock();
        let mut result = DispatchResult::default();
        for entry in inner.entries.iter_mut().filter(|entry| entry.kind == kind) {
            let disposition = (entry.handler)(event, now);
            if disposition.prevent_default {
                if entry.options.passive {
                    trace!(?kind, "ignoring prevent_default from passive listener");
                } else {
                    result.default_prevented = true;
                }
            }
            result.outcomes.push(disposition.outcome);
        }
        result
    }
}

impl std::fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Removes its listener from the target on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    target: Weak<Mutex<TargetInner>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(target) = self.target.upgrade() {
            target.lock().entries.retain(|entry| entry.id != self.id);
        }
    }
}

/// A carousel with its input adapters installed.
///
/// Wheel and touch listeners go on the container, the keyboard listener on
/// the window. Dropping the value removes every listener and disposes the
/// carousel, so timer deadlines reached afterwards do nothing.
pub struct MountedCarousel<P> {
    carousel: Arc<Mutex<Carousel<P>>>,
    listeners: Vec<ListenerGuard>,
}

impl<P: Send + 'static> MountedCarousel<P> {
    /// Installs the adapters of `carousel` on `container` and `window`.
    pub fn mount(carousel: Carousel<P>, container: &EventTarget, window: &EventTarget) -> Self {
        let carousel = Arc::new(Mutex::new(carousel));
        let bindings = [
            (container, EventKind::Wheel, ListenerOptions::ACTIVE),
            (container, EventKind::TouchStart, ListenerOptions::PASSIVE),
            (container, EventKind::TouchMove, ListenerOptions::ACTIVE),
            (container, EventKind::TouchEnd, ListenerOptions::ACTIVE),
            (container, EventKind::TouchCancel, ListenerOptions::ACTIVE),
            (window, EventKind::KeyDown, ListenerOptions::ACTIVE),
        ];
        let listeners = bindings
            .into_iter()
            .map(|(target, kind, options)| {
                let carousel = Arc::clone(&carousel);
                target.add_listener(kind, options, move |event, now| {
                    carousel.lock().dispatch(event, now)
                })
            })
            .collect();
        Self {
            carousel,
            listeners,
        }
    }
}

impl<P> MountedCarousel<P> {
    /// Reads the carousel.
    pub fn with<R>(&self, f: impl FnOnce(&Carousel<P>) -> R) -> R {
        f(&self.carousel.lock())
    }

    /// Mutates the carousel, e.g. to sync a controlled index.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Carousel<P>) -> R) -> R {
        f(&mut self.carousel.lock())
    }

    /// Fires due timers.
    pub fn tick(&self, now: Instant) -> TickReport {
        self.carousel.lock().tick(now)
    }

    /// Number of listeners this mount holds.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Removes the listeners and disposes the carousel.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<P> Drop for MountedCarousel<P> {
    fn drop(&mut self) {
        self.listeners.clear();
        self.carousel.lock().dispose();
    }
}

impl<P> std::fmt::Debug for MountedCarousel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedCarousel")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        args::CarouselArgs,
        input::{Key, WheelEvent},
    };

    fn targets() -> (EventTarget, EventTarget) {
        (EventTarget::new(), EventTarget::new())
    }

    #[test]
    fn guard_removes_its_listener() {
        let target = EventTarget::new();
        let guard = target.add_listener(EventKind::Wheel, ListenerOptions::ACTIVE, |_, _| {
            Disposition::ignored()
        });
        assert_eq!(target.listener_count(), 1);
        drop(guard);
        assert_eq!(target.listener_count(), 0);
    }

    #[test]
    fn guard_outliving_target_is_harmless() {
        let target = EventTarget::new();
        let guard = target.add_listener(EventKind::KeyDown, ListenerOptions::ACTIVE, |_, _| {
            Disposition::ignored()
        });
        drop(target);
        drop(guard);
    }

    #[test]
    fn passive_listener_cannot_prevent_default() {
        let target = EventTarget::new();
        let _guard = target.add_listener(EventKind::TouchStart, ListenerOptions::PASSIVE, |_, _| {
            Disposition::prevented(Outcome::Swallowed)
        });
        let result = target.dispatch(&InputEvent::TouchStart { y: 0.0 }, Instant::now());
        assert!(!result.default_prevented);
        assert_eq!(result.outcomes, vec![Outcome::Swallowed]);
    }

    #[test]
    fn mount_routes_events_and_unmount_cleans_up() {
        let start = Instant::now();
        let (container, window) = targets();
        let carousel = Carousel::new(vec![0, 1, 2, 3], CarouselArgs::default());
        let mounted = MountedCarousel::mount(carousel, &container, &window);
        assert_eq!(container.listener_count(), 5);
        assert_eq!(window.listener_count(), 1);
        assert_eq!(mounted.listener_count(), 6);

        let wheel = container.dispatch(&InputEvent::Wheel(WheelEvent::vertical(150.0)), start);
        assert!(wheel.default_prevented);
        assert_eq!(wheel.outcomes, vec![Outcome::Committed(1)]);

        // Window keys do not reach the container and vice versa.
        assert!(container
            .dispatch(&InputEvent::KeyDown(Key::ArrowDown), start)
            .outcomes
            .is_empty());

        mounted.tick(start + Duration::from_millis(450));
        let key = window.dispatch(
            &InputEvent::KeyDown(Key::ArrowDown),
            start + Duration::from_millis(460),
        );
        assert_eq!(key.outcomes, vec![Outcome::Committed(2)]);
        assert_eq!(mounted.with(|c| c.current_index()), 2);

        mounted.unmount();
        assert_eq!(container.listener_count(), 0);
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn unmounted_carousel_is_disposed() {
        let start = Instant::now();
        let (container, window) = targets();
        let mounted = MountedCarousel::mount(
            Carousel::new(vec!['a', 'b'], CarouselArgs::default()),
            &container,
            &window,
        );
        let shared = Arc::clone(&mounted.carousel);
        container.dispatch(&InputEvent::Wheel(WheelEvent::vertical(50.0)), start);
        drop(mounted);

        let report = shared.lock().tick(start + Duration::from_secs(1));
        assert_eq!(report, TickReport::default());
        assert_eq!(shared.lock().drag_offset(), 0.0);
    }
}
