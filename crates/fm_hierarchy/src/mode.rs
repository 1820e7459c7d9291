//! Hierarchy edge kinds a distance search may follow.

use bitflags::bitflags;

bitflags! {
    /// Which hierarchy edges the distance search may follow.
    ///
    /// An empty set is treated as "both" when an evaluator is built.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TraversalMode: u8 {
        /// Follow the direct superclass of a class.
        const SUPERCLASS = 1 << 0;
        /// Follow directly implemented or extended interfaces.
        const INTERFACES = 1 << 1;
    }
}

impl TraversalMode {
    /// Map the empty set to every edge kind.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_empty() {
            Self::all()
        } else {
            self
        }
    }

    #[inline]
    pub fn follows_superclass(self) -> bool {
        self.contains(Self::SUPERCLASS)
    }

    #[inline]
    pub fn follows_interfaces(self) -> bool {
        self.contains(Self::INTERFACES)
    }
}

impl Default for TraversalMode {
    fn default() -> Self {
        Self::all()
    }
}
