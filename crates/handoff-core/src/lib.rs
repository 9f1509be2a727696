//! # Handoff Core
//!
//! Chain of responsibility building blocks.
//!
//! This layer provides:
//! - [`Handler`]: a named link that owns at most one successor
//! - [`Responder`]: the injected match-and-produce step of a handler
//! - [`Outcome`]: `Handled(value)` or `Unhandled`, never an error
//! - [`ChainArena`]: index-addressed chains whose tails can be shared
//! - A `tower::Service` implementation for handlers
//!
//! Dispatch is synchronous. A chain is assembled once with
//! [`Handler::set_next`] and can then serve any number of requests from any
//! entry point along it.

pub mod arena;
pub mod error;
pub mod handler;
pub mod outcome;
pub mod responder;
pub mod service;

pub use arena::{ChainArena, HandlerId};
pub use error::{ChainError, ChainResult};
pub use handler::{Handler, Links};
pub use outcome::Outcome;
pub use responder::{Accepts, BoxedResponder, Responder, Template, When};
