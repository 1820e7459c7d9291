//! Hierarchy construction errors.

use thiserror::Error;

/// Error raised while declaring a type in a [`HierarchyBuilder`](crate::HierarchyBuilder).
///
/// A failed declaration leaves the builder unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("type names must not be empty")]
    EmptyName,

    #[error("type `{name}` is already declared")]
    DuplicateType { name: String },

    #[error("type `{name}` refers to undeclared type `{parent}`")]
    UnknownParent { name: String, parent: String },

    #[error("class `{name}` cannot extend `{parent}`: it is an interface")]
    SuperclassNotClass { name: String, parent: String },

    #[error("type `{name}` cannot implement `{parent}`: it is a class")]
    NotAnInterface { name: String, parent: String },

    #[error("type `{name}` lists interface `{parent}` more than once")]
    RepeatedInterface { name: String, parent: String },

    #[error("hierarchy exceeded u32::MAX types")]
    Overflow,
}
