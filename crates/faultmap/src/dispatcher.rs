//! Configured front door for handler resolution.

use std::sync::Arc;

use fm_hierarchy::{TypeHierarchy, TypeIdx};
use fm_registry::{CacheStats, CachingResolver, HandlerRegistry, Registration, Resolve};
use tracing::debug;

use crate::{DispatchConfig, DispatchError};

/// A handler registry, optionally behind a resolver cache.
///
/// Build once at startup with [`Dispatcher::from_config`], then share it
/// (e.g. in an `Arc`) and call [`resolve`](Resolve::resolve) per failure.
#[derive(Debug)]
pub enum Dispatcher<H: Clone> {
    Direct(HandlerRegistry<H>),
    Cached(CachingResolver<HandlerRegistry<H>>),
}

impl<H: Clone> Dispatcher<H> {
    /// Validate `config`, build the registry and wrap it in a cache when
    /// caching is enabled.
    pub fn from_config<I>(
        hierarchy: Arc<TypeHierarchy>,
        registrations: I,
        config: &DispatchConfig,
    ) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = Registration<H>>,
    {
        config.validate()?;
        let registry = HandlerRegistry::new(hierarchy, registrations, config.evaluator())?;

        let dispatcher = match config.caching.policy() {
            Some(policy) => Self::Cached(CachingResolver::with_policy(registry, policy)),
            None => Self::Direct(registry),
        };
        debug!(
            cached = dispatcher.is_cached(),
            registrations = dispatcher.registry().len(),
            "dispatcher ready"
        );
        Ok(dispatcher)
    }

    /// The underlying registry, bypassing any cache.
    pub fn registry(&self) -> &HandlerRegistry<H> {
        match self {
            Self::Direct(registry) => registry,
            Self::Cached(cached) => cached.delegate(),
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }

    /// Cache statistics, or `None` without a cache.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match self {
            Self::Direct(_) => None,
            Self::Cached(cached) => Some(cached.stats()),
        }
    }

    /// Resolve a type by name; unknown names resolve to nothing.
    pub fn resolve_named(&self, name: &str) -> Option<H> {
        let target = self.registry().hierarchy().lookup(name)?;
        self.resolve(target)
    }
}

impl<H: Clone> Resolve for Dispatcher<H> {
    type Handler = H;

    fn resolve(&self, target: TypeIdx) -> Option<H> {
        match self {
            Self::Direct(registry) => registry.resolve(target),
            Self::Cached(cached) => cached.resolve(target),
        }
    }
}
