//! Most-specific handler dispatch for typed failures.
//!
//! Given a fixed set of handlers, each registered against an ancestor type,
//! faultmap resolves the handler whose key is the closest ancestor of a
//! failure's runtime type.
//!
//! ```text
//! DispatchConfig ──┐
//! TypeHierarchy  ──┼── Dispatcher::from_config ──> Dispatcher<H>
//! Registration*  ──┘                                 ├── Direct(HandlerRegistry)
//!                                                    └── Cached(CachingResolver)
//! ```
//!
//! The hierarchy, registry and caches live in [`fm_hierarchy`] and
//! [`fm_registry`]; this crate binds them to configuration.

mod config;
mod dispatcher;
mod error;

pub use config::{CachingConfig, DispatchConfig, TraversalEdge, DEFAULT_MAX_CACHE_SIZE};
pub use dispatcher::Dispatcher;
pub use error::{ConfigError, DispatchError};

pub use fm_hierarchy::{
    Distance, DistanceEvaluator, GraphDistance, HierarchyBuilder, HierarchyError, TraversalMode,
    TypeEntry, TypeHierarchy, TypeIdx, TypeKind, DEFAULT_MAX_DEPTH,
};
pub use fm_registry::{
    CachePolicy, CacheStats, CachingResolver, FnResolver, HandlerRegistry, Match, Registration,
    RegistryBuilder, RegistryError, Resolve, ResolverCache,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=fm_registry=trace` or `RUST_LOG=faultmap=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
