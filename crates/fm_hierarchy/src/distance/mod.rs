//! Inheritance distance between a runtime type and a candidate ancestor.
//!
//! The distance is the number of hierarchy edges walked from the target
//! to the base. Lower means more specific.
//!
//! # Search
//!
//! From a type, the enabled edges (see [`TraversalMode`]) lead to its direct
//! superclass and its direct interfaces. Each edge has length 1 and the
//! result is the minimum over all edges. Types that cannot reach the base
//! at all are pruned using the hierarchy's assignability check.
//!
//! The walk is bounded by a depth budget. A base that is assignable but
//! only reachable beyond the budget, or only through an excluded edge kind,
//! is [`Distance::Unreachable`].

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{TraversalMode, TypeHierarchy, TypeIdx};

/// Default depth budget for distance searches.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Minimum stack space to keep available before recursing (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Result of a distance search.
///
/// Ordered so that any reachable distance is smaller than `Unreachable`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Distance {
    /// Number of edges from the target to the base.
    Edges(u32),
    /// Not a subtype, or not reachable within the budget and enabled edges.
    Unreachable,
}

impl Distance {
    /// The distance from a type to itself.
    pub const ZERO: Self = Self::Edges(0);

    pub fn edges(self) -> Option<u32> {
        match self {
            Self::Edges(n) => Some(n),
            Self::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Edges(_))
    }

    /// One more edge on top of this distance.
    #[inline]
    fn step(self) -> Self {
        match self {
            Self::Edges(n) => Self::Edges(n.saturating_add(1)),
            Self::Unreachable => Self::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edges(n) => write!(f, "{n}"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Strategy for measuring inheritance distance.
pub trait DistanceEvaluator: fmt::Debug {
    /// Distance from `target` to `base`, searching at most `max_depth` edges.
    fn distance(
        &self,
        hierarchy: &TypeHierarchy,
        target: TypeIdx,
        base: TypeIdx,
        max_depth: u32,
    ) -> Distance;

    /// Depth budget used by [`distance_default`](Self::distance_default).
    fn default_max_depth(&self) -> u32 {
        DEFAULT_MAX_DEPTH
    }

    fn distance_default(
        &self,
        hierarchy: &TypeHierarchy,
        target: TypeIdx,
        base: TypeIdx,
    ) -> Distance {
        self.distance(hierarchy, target, base, self.default_max_depth())
    }
}

/// Bounded-depth graph search over the type hierarchy.
///
/// Without memoisation this is a plain depth-first walk that may visit a
/// shared ancestor once per path; that is fine for hierarchies a few
/// levels deep. With memoisation enabled, results for `(type, remaining
/// depth)` pairs are reused within a single call, which yields the same
/// distance while keeping wide interface DAGs linear.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GraphDistance {
    mode: TraversalMode,
    default_max_depth: u32,
    memoized: bool,
}

impl GraphDistance {
    /// Create an evaluator following the given edge kinds.
    ///
    /// An empty mode follows every edge kind.
    pub fn new(mode: TraversalMode) -> Self {
        Self {
            mode: mode.normalized(),
            default_max_depth: DEFAULT_MAX_DEPTH,
            memoized: false,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.default_max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoized = enabled;
        self
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    pub fn is_memoized(&self) -> bool {
        self.memoized
    }
}

impl Default for GraphDistance {
    fn default() -> Self {
        Self::new(TraversalMode::all())
    }
}

impl DistanceEvaluator for GraphDistance {
    fn distance(
        &self,
        hierarchy: &TypeHierarchy,
        target: TypeIdx,
        base: TypeIdx,
        max_depth: u32,
    ) -> Distance {
        let mut search = Search {
            hierarchy,
            base,
            mode: self.mode,
            memo: self.memoized.then(FxHashMap::default),
        };
        search.walk(target, max_depth)
    }

    fn default_max_depth(&self) -> u32 {
        self.default_max_depth
    }
}

/// State for one distance query.
struct Search<'h> {
    hierarchy: &'h TypeHierarchy,
    base: TypeIdx,
    mode: TraversalMode,
    memo: Option<FxHashMap<(TypeIdx, u32), Distance>>,
}

impl Search<'_> {
    fn walk(&mut self, current: TypeIdx, remaining: u32) -> Distance {
        if current == self.base && self.hierarchy.contains(current) {
            return Distance::ZERO;
        }
        if remaining == 0 || !self.hierarchy.is_assignable(current, self.base) {
            return Distance::Unreachable;
        }

        if let Some(hit) = self
            .memo
            .as_ref()
            .and_then(|memo| memo.get(&(current, remaining)))
        {
            return *hit;
        }

        let result = grow_stack(|| self.walk_edges(current, remaining));

        if let Some(memo) = self.memo.as_mut() {
            memo.insert((current, remaining), result);
        }
        result
    }

    fn walk_edges(&mut self, current: TypeIdx, remaining: u32) -> Distance {
        let hierarchy = self.hierarchy;
        let mut best = Distance::Unreachable;

        if self.mode.follows_superclass() {
            if let Some(parent) = hierarchy.superclass(current) {
                best = best.min(self.walk(parent, remaining - 1).step());
            }
        }

        if self.mode.follows_interfaces() {
            for &parent in hierarchy.interfaces(current) {
                best = best.min(self.walk(parent, remaining - 1).step());
                if best == Distance::Edges(1) {
                    break;
                }
            }
        }

        best
    }
}

#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
