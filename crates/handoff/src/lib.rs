//! # Handoff
//!
//! A small, type-safe Chain of Responsibility library for Rust.
//!
//! ## Overview
//!
//! A request is offered to the first handler of a chain. Each handler either
//! answers it, which stops the walk, or passes it on to its successor. When
//! nobody answers, the caller gets [`Outcome::Unhandled`](prelude::Outcome).
//!
//! ```text
//! ┌────────┐     ┌──────────┐     ┌──────────┐     ┌─────┐
//! │ Client │────▶│  Monkey  │────▶│ Squirrel │────▶│ Dog │────▶ Unhandled
//! └────────┘     └──────────┘     └──────────┘     └─────┘
//!                     │                 │              │
//!                     └─────────────────┴──────────────┴──▶ Handled(reply)
//! ```
//!
//! - **Core**: `Handler`, `Responder`, `Outcome` and the index-based `ChainArena`
//! - **Runtime**: Configuration loading, chain assembly and logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use handoff::prelude::*;
//!
//! let mut monkey = Handler::<str, String>::accepting("Monkey", ["Banana"], Template::default());
//! monkey
//!     .set_next(Handler::accepting("Squirrel", ["Nut"], Template::default()))
//!     .set_next(Handler::accepting("Dog", ["Meatball"], Template::default()));
//!
//! assert_eq!(
//!     monkey.handle("Nut"),
//!     Outcome::Handled("Squirrel: I'll eat the Nut.".to_string())
//! );
//! assert!(monkey.handle("Coffee cup").is_unhandled());
//! ```
//!
//! ## Features
//!
//! - `json-log`: Enable JSON log output

pub use handoff_core as core;
pub use handoff_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use handoff::prelude::*;
/// ```
pub mod prelude {
    // Chain building blocks
    pub use handoff_core::{Accepts, Handler, Outcome, Responder, Template, When};

    // Arena chains with shared tails
    pub use handoff_core::{ChainArena, ChainError, HandlerId};

    // Configuration and assembly
    pub use handoff_runtime::{ChainAssembly, ConfigLoader, HandoffConfig, assemble};
}
