use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for grid entities.
///
/// - `u32` keeps per-element storage small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized, which matters for
///   the optional outside element of a facet
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Returns `None` when `index + 1` does not fit in a `u32`.
    pub fn try_from_index(index: usize) -> Option<Self> {
        let stored = u32::try_from(index).ok()?.checked_add(1)?;
        NonZeroU32::new(stored).map(Self)
    }

    /// Create an Id from a 0-based `u32` index.
    pub fn from_index(index: u32) -> Self {
        match index.checked_add(1).and_then(NonZeroU32::new) {
            Some(v) => Self(v),
            None => Self(NonZeroU32::MAX),
        }
    }

    /// Recover the 0-based index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Grid element (cell) handle.
pub type ElementId = Id;
/// Grid facet handle.
pub type FacetId = Id;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = Id::try_from_index(i).unwrap();
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn id_rejects_overflowing_index() {
        assert!(Id::try_from_index(u32::MAX as usize).is_none());
    }

    proptest! {
        #[test]
        fn try_from_index_inverts_index(i in 0_usize..(u32::MAX as usize)) {
            prop_assert_eq!(Id::try_from_index(i).map(Id::index), Some(i));
        }

        #[test]
        fn from_index_matches_checked_constructor(i in 0_u32..u32::MAX) {
            prop_assert_eq!(Some(Id::from_index(i)), Id::try_from_index(i as usize));
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }
}
