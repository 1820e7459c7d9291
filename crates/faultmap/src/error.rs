//! Dispatcher assembly errors.

use fm_registry::RegistryError;
use thiserror::Error;

/// Invalid [`DispatchConfig`](crate::DispatchConfig).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
}

/// Error raised while building a [`Dispatcher`](crate::Dispatcher).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("invalid dispatch configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid handler registrations: {0}")]
    Registry(#[from] RegistryError),
}
