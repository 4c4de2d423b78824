//! Named slide definitions.
//!
//! Slides carry a stable `id` (used by hosts for links) and a `label` (used
//! by navigation). Their content is rendered by the host and receives a
//! [`SlideContext`] describing where the slide sits in the deck.

use std::time::Instant;

use tracing::warn;

use crate::{args::CarouselArgs, carousel::Carousel, input::Outcome};

/// One slide of the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDef<C> {
    /// Stable identifier, unique within a [`SlideSet`].
    pub id: String,
    /// Human-readable name.
    pub label: String,
    /// Host-defined content.
    pub content: C,
}

impl<C> SlideDef<C> {
    /// Creates a slide.
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content,
        }
    }
}

/// What a slide renderer needs to know about its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideContext {
    /// Position of the slide in the deck.
    pub index: usize,
    /// Whether a later slide exists, i.e. a "next" affordance makes sense.
    pub has_next: bool,
    /// Whether the slide is the current one.
    pub is_current: bool,
}

impl SlideContext {
    fn new(index: usize, current: usize, count: usize) -> Self {
        Self {
            index,
            has_next: index + 1 < count,
            is_current: index == current,
        }
    }

    /// Asks `carousel` for the slide after this one, as the slide's "next"
    /// button does.
    ///
    /// Only the current slide with a successor can request it. The request
    /// goes through [`Carousel::go_next`], so it is dropped while a
    /// transition holds the animation lock.
    pub fn request_next<P>(&self, carousel: &mut Carousel<P>, now: Instant) -> Outcome {
        if !self.has_next || carousel.current_index() != self.index {
            return Outcome::Ignored;
        }
        carousel.go_next(now)
    }
}

/// Ordered slide deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideSet<C> {
    slides: Vec<SlideDef<C>>,
}

impl<C> SlideSet<C> {
    /// Builds a deck; a later slide reusing an earlier id is dropped.
    pub fn new(slides: impl IntoIterator<Item = SlideDef<C>>) -> Self {
        let mut deck: Vec<SlideDef<C>> = Vec::new();
        for slide in slides {
            if deck.iter().any(|existing| existing.id == slide.id) {
                warn!(id = %slide.id, "duplicate slide id ignored");
                continue;
            }
            deck.push(slide);
        }
        Self { slides: deck }
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide at `index`.
    pub fn get(&self, index: usize) -> Option<&SlideDef<C>> {
        self.slides.get(index)
    }

    /// Index of the slide with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|slide| slide.id == id)
    }

    /// Iterates the slides in order.
    pub fn iter(&self) -> impl Iterator<Item = &SlideDef<C>> {
        self.slides.iter()
    }

    /// Render context for the slide at `index` while `current` is shown.
    pub fn context(&self, index: usize, current: usize) -> SlideContext {
        SlideContext::new(index, current, self.slides.len())
    }

    /// Hands the deck to a carousel.
    pub fn into_carousel(self, args: CarouselArgs) -> Carousel<SlideDef<C>> {
        Carousel::new(self.slides, args)
    }
}

impl<P> Carousel<P> {
    /// Render context for the page at `index`.
    pub fn slide_context(&self, index: usize) -> SlideContext {
        SlideContext::new(index, self.current_index(), self.page_count())
    }

    /// Render contexts for every page, in order.
    pub fn slide_contexts(&self) -> impl Iterator<Item = SlideContext> + '_ {
        (0..self.page_count()).map(|index| self.slide_context(index))
    }
}
