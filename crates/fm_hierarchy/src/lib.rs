//! Type hierarchy and inheritance distance for faultmap.
//!
//! Failure types are described as values rather than discovered through
//! reflection. A [`TypeHierarchy`] is an immutable arena of [`TypeEntry`]
//! descriptors, each with at most one superclass and any number of
//! interface-like supertypes. Handles into the arena are [`TypeIdx`].
//!
//! # Architecture
//!
//! ```text
//! HierarchyBuilder ──build──> TypeHierarchy (arena + ancestor sets)
//!                                  │
//!                                  └── DistanceEvaluator (GraphDistance)
//!                                          gated by TraversalMode
//! ```
//!
//! # Design Decisions
//!
//! - Parents must be declared before children, so cycles cannot be built
//! - Assignability is answered from ancestor sets computed at declaration
//! - Distance search is a bounded-depth walk; memoisation is opt-in and
//!   never changes the returned distance

mod distance;
mod error;
mod hierarchy;
mod idx;
mod mode;

pub use distance::{Distance, DistanceEvaluator, GraphDistance, DEFAULT_MAX_DEPTH};
pub use error::HierarchyError;
pub use hierarchy::{HierarchyBuilder, TypeEntry, TypeHierarchy, TypeKind};
pub use idx::TypeIdx;
pub use mode::TraversalMode;
