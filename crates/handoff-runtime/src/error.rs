//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while turning configuration into a chain.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// There are no handlers to link.
    #[error("Chain has no handlers")]
    EmptyChain,
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
