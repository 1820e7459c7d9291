//! Immutable type hierarchy arena.
//!
//! A `TypeHierarchy` stores every declared failure type as a [`TypeEntry`]
//! and answers structural queries about it.
//!
//! # Design
//!
//! - Entries live in a single `Vec<TypeEntry>`; [`TypeIdx`] is the slot
//! - Name → index lookup via `FxHashMap`
//! - Each type carries its full ancestor set, computed once when the type
//!   is declared from the (already complete) sets of its parents

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{HierarchyError, TypeIdx};

/// Whether a type is a class or an interface-like supertype.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    /// Has at most one superclass and may implement interfaces.
    Class,
    /// Has no superclass and may extend other interfaces.
    Interface,
}

/// A declared type and its direct supertypes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// The type name, unique within its hierarchy.
    pub name: String,

    pub kind: TypeKind,

    /// Direct superclass (always `None` for interfaces).
    pub superclass: Option<TypeIdx>,

    /// Directly implemented (class) or extended (interface) interfaces,
    /// in declaration order.
    pub interfaces: Vec<TypeIdx>,
}

/// Immutable arena of type descriptors.
///
/// Built with [`HierarchyBuilder`]. Queries with an index that does not
/// belong to this hierarchy answer as if the type were absent.
#[derive(Clone, Debug, Default)]
pub struct TypeHierarchy {
    entries: Vec<TypeEntry>,

    by_name: FxHashMap<String, TypeIdx>,

    /// Transitive supertypes of each entry, excluding the entry itself.
    ancestors: Vec<FxHashSet<TypeIdx>>,
}

impl TypeHierarchy {
    /// Start declaring a new hierarchy.
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new()
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeIdx> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, idx: TypeIdx) -> bool {
        idx.slot() < self.entries.len()
    }

    pub fn entry(&self, idx: TypeIdx) -> Option<&TypeEntry> {
        self.entries.get(idx.slot())
    }

    pub fn name(&self, idx: TypeIdx) -> Option<&str> {
        self.entry(idx).map(|entry| entry.name.as_str())
    }

    pub fn kind(&self, idx: TypeIdx) -> Option<TypeKind> {
        self.entry(idx).map(|entry| entry.kind)
    }

    /// The direct superclass of `idx`, if it has one.
    pub fn superclass(&self, idx: TypeIdx) -> Option<TypeIdx> {
        self.entry(idx).and_then(|entry| entry.superclass)
    }

    /// The direct interfaces of `idx` (empty for unknown indices).
    pub fn interfaces(&self, idx: TypeIdx) -> &[TypeIdx] {
        self.entry(idx)
            .map_or(&[][..], |entry| entry.interfaces.as_slice())
    }

    /// Whether a value of type `target` can be treated as a `base`.
    ///
    /// True when the types are equal or `base` is a transitive supertype
    /// of `target` through any edge kind. Traversal modes do not apply here.
    pub fn is_assignable(&self, target: TypeIdx, base: TypeIdx) -> bool {
        if !self.contains(target) || !self.contains(base) {
            return false;
        }
        target == base
            || self
                .ancestors
                .get(target.slot())
                .is_some_and(|set| set.contains(&base))
    }

    /// Number of transitive supertypes of `idx`.
    pub fn ancestor_count(&self, idx: TypeIdx) -> usize {
        self.ancestors.get(idx.slot()).map_or(0, FxHashSet::len)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeIdx, &TypeEntry)> {
        (0u32..)
            .map(TypeIdx::from_raw)
            .zip(self.entries.iter())
    }
}

/// Incremental builder for a [`TypeHierarchy`].
///
/// Every supertype must be declared before the types that refer to it.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: TypeHierarchy,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class with an optional superclass and implemented interfaces.
    pub fn class(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        interfaces: &[&str],
    ) -> Result<TypeIdx, HierarchyError> {
        self.declare(name, TypeKind::Class, superclass, interfaces)
    }

    /// Declare an interface extending zero or more interfaces.
    pub fn interface(&mut self, name: &str, extends: &[&str]) -> Result<TypeIdx, HierarchyError> {
        self.declare(name, TypeKind::Interface, None, extends)
    }

    /// Look up an already declared type.
    pub fn lookup(&self, name: &str) -> Option<TypeIdx> {
        self.hierarchy.lookup(name)
    }

    pub fn build(self) -> TypeHierarchy {
        debug!(types = self.hierarchy.len(), "type hierarchy built");
        self.hierarchy
    }

    fn declare(
        &mut self,
        name: &str,
        kind: TypeKind,
        superclass: Option<&str>,
        interfaces: &[&str],
    ) -> Result<TypeIdx, HierarchyError> {
        if name.is_empty() {
            return Err(HierarchyError::EmptyName);
        }
        if self.hierarchy.by_name.contains_key(name) {
            return Err(HierarchyError::DuplicateType {
                name: name.to_owned(),
            });
        }

        let superclass = match superclass {
            Some(parent) => {
                let idx = self.resolve_parent(name, parent)?;
                if self.hierarchy.kind(idx) != Some(TypeKind::Class) {
                    return Err(HierarchyError::SuperclassNotClass {
                        name: name.to_owned(),
                        parent: parent.to_owned(),
                    });
                }
                Some(idx)
            }
            None => None,
        };

        let mut direct = Vec::with_capacity(interfaces.len());
        for &parent in interfaces {
            let idx = self.resolve_parent(name, parent)?;
            if self.hierarchy.kind(idx) != Some(TypeKind::Interface) {
                return Err(HierarchyError::NotAnInterface {
                    name: name.to_owned(),
                    parent: parent.to_owned(),
                });
            }
            if direct.contains(&idx) {
                return Err(HierarchyError::RepeatedInterface {
                    name: name.to_owned(),
                    parent: parent.to_owned(),
                });
            }
            direct.push(idx);
        }

        let raw = u32::try_from(self.hierarchy.entries.len())
            .map_err(|_| HierarchyError::Overflow)?;
        let idx = TypeIdx::from_raw(raw);

        // Parents are complete, so their sets already hold everything above them.
        let mut ancestors = FxHashSet::default();
        for parent in superclass.iter().chain(direct.iter()) {
            ancestors.insert(*parent);
            ancestors.extend(self.hierarchy.ancestors[parent.slot()].iter().copied());
        }

        self.hierarchy.entries.push(TypeEntry {
            name: name.to_owned(),
            kind,
            superclass,
            interfaces: direct,
        });
        self.hierarchy.ancestors.push(ancestors);
        self.hierarchy.by_name.insert(name.to_owned(), idx);

        Ok(idx)
    }

    fn resolve_parent(&self, name: &str, parent: &str) -> Result<TypeIdx, HierarchyError> {
        self.hierarchy
            .lookup(parent)
            .ok_or_else(|| HierarchyError::UnknownParent {
                name: name.to_owned(),
                parent: parent.to_owned(),
            })
    }
}
