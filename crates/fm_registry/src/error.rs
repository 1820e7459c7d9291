//! Registry construction errors.

use fm_hierarchy::TypeIdx;
use thiserror::Error;

/// Error raised while building a [`HandlerRegistry`](crate::HandlerRegistry).
///
/// Construction is all-or-nothing: on error no registry is produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type `{name}` is not declared in the hierarchy")]
    UnknownTypeName { name: String },

    #[error("{key:?} does not belong to the registry's hierarchy")]
    UnknownKeyType { key: TypeIdx },

    #[error("a handler for `{name}` is already registered at position {first}")]
    DuplicateKey { name: String, first: usize },
}
