//! Configuration module for the handoff runtime.
//!
//! This module provides TOML and environment based configuration loading
//! and validation for chain definitions and logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    ChainConfig, HandlerConfig, HandoffConfig, LogFormat, LogLevel, LogOutput, LoggingConfig,
    SpanEventConfig,
};
pub use validation::{validate_chain_config, validate_config};
