//! Construction-time configuration.
//!
//! Deserializable with any serde format; every field has a default, so an
//! empty document yields [`DispatchConfig::default`].

use fm_hierarchy::{GraphDistance, TraversalMode, DEFAULT_MAX_DEPTH};
use fm_registry::CachePolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default capacity of the bounded resolver cache.
pub const DEFAULT_MAX_CACHE_SIZE: i64 = 128;

/// A hierarchy edge kind, as named in configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalEdge {
    Superclass,
    Interfaces,
}

impl From<TraversalEdge> for TraversalMode {
    fn from(edge: TraversalEdge) -> Self {
        match edge {
            TraversalEdge::Superclass => TraversalMode::SUPERCLASS,
            TraversalEdge::Interfaces => TraversalMode::INTERFACES,
        }
    }
}

/// Settings for building a [`Dispatcher`](crate::Dispatcher).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Edge kinds the distance search may follow; empty means all.
    pub traversal: Vec<TraversalEdge>,
    /// Depth budget for distance searches.
    pub max_depth: u32,
    pub caching: CachingConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            traversal: vec![TraversalEdge::Superclass, TraversalEdge::Interfaces],
            max_depth: DEFAULT_MAX_DEPTH,
            caching: CachingConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }

    /// Fold the configured edge kinds into a mode; empty selects all.
    pub fn traversal_mode(&self) -> TraversalMode {
        self.traversal
            .iter()
            .fold(TraversalMode::empty(), |mode, &edge| mode | TraversalMode::from(edge))
            .normalized()
    }

    /// The evaluator described by this configuration.
    pub fn evaluator(&self) -> GraphDistance {
        GraphDistance::new(self.traversal_mode()).with_max_depth(self.max_depth)
    }
}

/// Resolver cache settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    pub enabled: bool,
    /// `<= 0` selects the unbounded cache, `> 0` an LRU of that capacity.
    pub max_cache_size: i64,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
        }
    }
}

impl CachingConfig {
    /// The cache policy to apply, or `None` when caching is disabled.
    pub fn policy(&self) -> Option<CachePolicy> {
        self.enabled
            .then(|| CachePolicy::from_max_entries(self.max_cache_size))
    }
}
