//! Type handle into a [`TypeHierarchy`](crate::TypeHierarchy) arena.

use std::fmt;

/// A 32-bit index into a type hierarchy arena.
///
/// Indices are only meaningful for the hierarchy that produced them.
/// Equality is index equality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeIdx(u32);

impl TypeIdx {
    /// Create an index from a raw u32 value.
    ///
    /// The index is not validated; hierarchy queries treat unknown
    /// indices as absent.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdx({})", self.0)
    }
}
