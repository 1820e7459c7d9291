//! Immutable registry of handlers keyed by ancestor type.
//!
//! # Design
//!
//! - Registrations are kept in a `Vec` in registration order; that order is
//!   the tie-break when two keys are equally close to a target
//! - `FxHashMap<TypeIdx, usize>` indexes keys for duplicate detection and
//!   the exact-match fast path
//! - Nothing is mutated after construction, so lookups need no locking

use std::fmt;
use std::sync::Arc;

use fm_hierarchy::{Distance, DistanceEvaluator, GraphDistance, TypeHierarchy, TypeIdx};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{RegistryError, Resolve};

/// A handler bound to the ancestor type it handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<H> {
    pub key: TypeIdx,
    pub handler: H,
}

impl<H> Registration<H> {
    pub fn new(key: TypeIdx, handler: H) -> Self {
        Self { key, handler }
    }
}

/// The winning registration for a lookup.
#[derive(Debug)]
pub struct Match<'a, H> {
    /// The registered key type.
    pub key: TypeIdx,
    /// Edges between the target and `key`.
    pub distance: Distance,
    /// Index of the registration in registration order.
    pub position: usize,
    pub handler: &'a H,
}

/// Read-only mapping from ancestor type to handler.
///
/// [`resolve`](Resolve::resolve) scans every registration whose key is a
/// supertype of the target and returns the handler with the smallest
/// reachable distance. Equal distances go to the earliest registration.
/// Keys that are supertypes but unreachable under the evaluator's
/// traversal mode or depth budget never match.
pub struct HandlerRegistry<H> {
    hierarchy: Arc<TypeHierarchy>,
    evaluator: Box<dyn DistanceEvaluator + Send + Sync>,
    registrations: Vec<Registration<H>>,
    by_key: FxHashMap<TypeIdx, usize>,
}

impl<H> HandlerRegistry<H> {
    /// Build a registry from the complete registration list.
    ///
    /// Fails on the first key that is not part of `hierarchy` or that is
    /// registered twice.
    pub fn new<I, E>(
        hierarchy: Arc<TypeHierarchy>,
        registrations: I,
        evaluator: E,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Registration<H>>,
        E: DistanceEvaluator + Send + Sync + 'static,
    {
        let registrations = registrations.into_iter();
        let mut stored = Vec::with_capacity(registrations.size_hint().0);
        let mut by_key = FxHashMap::default();

        for (position, registration) in registrations.enumerate() {
            let Some(name) = hierarchy.name(registration.key) else {
                return Err(RegistryError::UnknownKeyType {
                    key: registration.key,
                });
            };
            if let Some(&first) = by_key.get(&registration.key) {
                return Err(RegistryError::DuplicateKey {
                    name: name.to_owned(),
                    first,
                });
            }
            by_key.insert(registration.key, position);
            stored.push(registration);
        }

        debug!(
            registrations = stored.len(),
            evaluator = ?evaluator,
            "handler registry built"
        );

        Ok(Self {
            hierarchy,
            evaluator: Box::new(evaluator),
            registrations: stored,
            by_key,
        })
    }

    /// Start a registry over `hierarchy` using the builder API.
    pub fn builder(hierarchy: Arc<TypeHierarchy>) -> RegistryBuilder<H> {
        RegistryBuilder::new(hierarchy)
    }

    /// Find the most specific registration for `target`.
    pub fn best_match(&self, target: TypeIdx) -> Option<Match<'_, H>> {
        if let Some(&position) = self.by_key.get(&target) {
            trace!(?target, position, "exact handler match");
            return Some(self.match_at(position, Distance::ZERO));
        }

        let max_depth = self.evaluator.default_max_depth();
        let mut best: Option<(usize, Distance)> = None;

        for (position, registration) in self.registrations.iter().enumerate() {
            if !self.hierarchy.is_assignable(target, registration.key) {
                continue;
            }
            let distance =
                self.evaluator
                    .distance(&self.hierarchy, target, registration.key, max_depth);
            trace!(?target, key = ?registration.key, %distance, "candidate handler");

            if !distance.is_reachable() {
                continue;
            }
            // Strictly smaller keeps the earlier registration on ties.
            if best.map_or(true, |(_, current)| distance < current) {
                best = Some((position, distance));
            }
        }

        best.map(|(position, distance)| self.match_at(position, distance))
    }

    fn match_at(&self, position: usize, distance: Distance) -> Match<'_, H> {
        let registration = &self.registrations[position];
        Match {
            key: registration.key,
            distance,
            position,
            handler: &registration.handler,
        }
    }

    /// The handler registered exactly on `key`, without any hierarchy search.
    pub fn get(&self, key: TypeIdx) -> Option<&H> {
        self.by_key
            .get(&key)
            .map(|&position| &self.registrations[position].handler)
    }

    pub fn hierarchy(&self) -> &Arc<TypeHierarchy> {
        &self.hierarchy
    }

    pub fn evaluator(&self) -> &(dyn DistanceEvaluator + Send + Sync) {
        self.evaluator.as_ref()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Iterate registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration<H>> {
        self.registrations.iter()
    }
}

impl<H: Clone> Resolve for HandlerRegistry<H> {
    type Handler = H;

    fn resolve(&self, target: TypeIdx) -> Option<H> {
        self.best_match(target).map(|found| found.handler.clone())
    }
}

impl<H> fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("registrations", &self.registrations.len())
            .field("types", &self.hierarchy.len())
            .field("evaluator", &self.evaluator)
            .finish()
    }
}

/// How a pending registration names its key.
enum KeyRef {
    Idx(TypeIdx),
    Name(String),
}

/// Collects registrations and validates them all at [`build`](Self::build).
pub struct RegistryBuilder<H> {
    hierarchy: Arc<TypeHierarchy>,
    pending: Vec<(KeyRef, H)>,
}

impl<H> RegistryBuilder<H> {
    pub fn new(hierarchy: Arc<TypeHierarchy>) -> Self {
        Self {
            hierarchy,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn register(mut self, key: TypeIdx, handler: H) -> Self {
        self.pending.push((KeyRef::Idx(key), handler));
        self
    }

    /// Register a handler on a type looked up by name at build time.
    #[must_use]
    pub fn register_named(mut self, name: impl Into<String>, handler: H) -> Self {
        self.pending.push((KeyRef::Name(name.into()), handler));
        self
    }

    /// Build with a [`GraphDistance`] following every edge kind.
    pub fn build(self) -> Result<HandlerRegistry<H>, RegistryError> {
        self.build_with(GraphDistance::default())
    }

    pub fn build_with<E>(self, evaluator: E) -> Result<HandlerRegistry<H>, RegistryError>
    where
        E: DistanceEvaluator + Send + Sync + 'static,
    {
        let hierarchy = self.hierarchy;
        let registrations = self
            .pending
            .into_iter()
            .map(|(key, handler)| {
                let key = match key {
                    KeyRef::Idx(idx) => idx,
                    KeyRef::Name(name) => hierarchy
                        .lookup(&name)
                        .ok_or(RegistryError::UnknownTypeName { name })?,
                };
                Ok(Registration::new(key, handler))
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        HandlerRegistry::new(hierarchy, registrations, evaluator)
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
