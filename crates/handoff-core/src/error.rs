//! Error types for chain assembly.
//!
//! Dispatch itself never fails: an unrecognized request is
//! [`Outcome::Unhandled`](crate::Outcome::Unhandled). Errors only arise when
//! wiring arena chains by index.

use thiserror::Error;

use crate::arena::HandlerId;

/// Errors that can occur while wiring or addressing an arena chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The id does not belong to this arena.
    #[error("unknown handler: {0}")]
    UnknownHandler(HandlerId),

    /// Linking `from` to `to` would make the successor path loop.
    #[error("linking {from} -> {to} would create a cycle")]
    Cycle {
        /// Handler whose successor was being set.
        from: HandlerId,
        /// Proposed successor.
        to: HandlerId,
    },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
