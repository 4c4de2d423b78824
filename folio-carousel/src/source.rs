//! Who owns the current page index.
//!
//! Both strategies keep a single mirrored index that the carousel renders
//! from; they differ only in whether an owner can push a new value in.

/// Index owned by the carousel itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InternalSource {
    index: usize,
}

/// Index owned by an external party and mirrored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExternalMirror {
    mirrored: usize,
}

/// Source of truth for the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSource {
    /// Uncontrolled mode.
    Internal(InternalSource),
    /// Controlled mode.
    External(ExternalMirror),
}

impl IndexSource {
    /// Uncontrolled source starting at `index`.
    pub fn internal(index: usize) -> Self {
        Self::Internal(InternalSource { index })
    }

    /// Controlled source mirroring `index`.
    pub fn external(index: usize) -> Self {
        Self::External(ExternalMirror { mirrored: index })
    }

    /// Index the carousel currently shows.
    pub fn current(&self) -> usize {
        match self {
            Self::Internal(source) => source.index,
            Self::External(mirror) => mirror.mirrored,
        }
    }

    /// Whether an external owner drives the index.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Records the index the carousel has transitioned to.
    pub fn record_commit(&mut self, index: usize) {
        match self {
            Self::Internal(source) => source.index = index,
            Self::External(mirror) => mirror.mirrored = index,
        }
    }

    /// Offers an owner-supplied, already clamped index.
    ///
    /// Returns the index to transition to when it differs from the mirror.
    /// `None` hands ownership back to the carousel, keeping the mirror.
    pub fn offer(&mut self, requested: Option<usize>) -> Option<usize> {
        let current = self.current();
        match requested {
            None => {
                *self = Self::internal(current);
                None
            }
            Some(requested) => {
                *self = Self::external(current);
                (requested != current).then_some(requested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_source_follows_commits() {
        let mut source = IndexSource::internal(0);
        source.record_commit(2);
        assert_eq!(source.current(), 2);
        assert!(!source.is_controlled());
        assert_eq!(source.offer(None), None);
    }

    #[test]
    fn external_offer_differing_from_mirror_transitions() {
        let mut source = IndexSource::external(1);
        assert_eq!(source.offer(Some(1)), None);
        assert_eq!(source.offer(Some(3)), Some(3));
    }

    #[test]
    fn owner_rejecting_a_commit_pulls_the_carousel_back() {
        let mut source = IndexSource::external(1);
        source.record_commit(2);
        assert_eq!(source.current(), 2);
        // Owner keeps supplying the old value.
        assert_eq!(source.offer(Some(1)), Some(1));
    }

    #[test]
    fn switching_modes_keeps_the_mirror() {
        let mut source = IndexSource::internal(2);
        assert_eq!(source.offer(Some(2)), None);
        assert!(source.is_controlled());
        assert_eq!(source.offer(None), None);
        assert!(!source.is_controlled());
        assert_eq!(source.current(), 2);
    }
}
