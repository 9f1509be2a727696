//! Handoff Runtime - configuration and assembly layer for handoff chains.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`, `HandoffConfig`)
//! - Chain assembly from configuration (`assemble`, `ChainAssembly`)
//! - Logging configuration
//!
//! ```ignore
//! use handoff_runtime::{ConfigLoader, assemble, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let chain = assemble(&config.chain)?;
//!     for request in &config.requests {
//!         println!("{:?}", chain.entry().handle(request.as_str()));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod assembly;
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use assembly::{ChainAssembly, assemble};
pub use config::{
    ChainConfig, ConfigError, ConfigLoader, ConfigResult, HandlerConfig, HandoffConfig, Profile,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
