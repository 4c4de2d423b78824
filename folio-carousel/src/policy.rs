//! Commit policy evaluated after every accumulation step.

use crate::gesture::Direction;

/// Outcome of evaluating an accumulated offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Turn the page in the given direction.
    Commit(Direction),
    /// Threshold crossed toward a missing neighbour; reset the offset.
    SnapBack,
    /// Keep accumulating.
    Undecided,
}

/// Neighbours available from the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbours {
    /// A previous page exists.
    pub prev: bool,
    /// A next page exists.
    pub next: bool,
}

impl Neighbours {
    /// Neighbours of `index` in a set of `count` pages.
    pub fn of(index: usize, count: usize) -> Self {
        Self {
            prev: index > 0,
            next: index + 1 < count,
        }
    }

    /// Whether a page exists in `direction`.
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Next => self.next,
            Direction::Prev => self.prev,
        }
    }
}

/// Decides what an offset means for the current page.
pub fn evaluate(offset: f32, threshold: f32, neighbours: Neighbours) -> Decision {
    if offset <= -threshold {
        return if neighbours.next {
            Decision::Commit(Direction::Next)
        } else {
            Decision::SnapBack
        };
    }
    if offset >= threshold {
        return if neighbours.prev {
            Decision::Commit(Direction::Prev)
        } else {
            Decision::SnapBack
        };
    }
    Decision::Undecided
}
