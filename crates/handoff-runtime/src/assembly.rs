//! Building a handler chain from configuration.
//!
//! Handlers are linked in the order they are listed, so the first entry
//! becomes the head and each subsequent one the successor of the previous.
//!
//! ```rust
//! use handoff_runtime::config::{ChainConfig, HandlerConfig};
//! use handoff_runtime::assemble;
//!
//! let config = ChainConfig {
//!     handlers: vec![
//!         HandlerConfig::new("Monkey", ["Banana"]),
//!         HandlerConfig::new("Squirrel", ["Nut"]),
//!     ],
//!     entry: Some("Squirrel".to_string()),
//!     ..Default::default()
//! };
//!
//! let chain = assemble(&config)?;
//! assert_eq!(chain.head().name(), "Monkey");
//! assert_eq!(chain.entry().name(), "Squirrel");
//! # Ok::<(), handoff_runtime::RuntimeError>(())
//! ```

use handoff_core::{Handler, Template};
use tracing::{debug, info};

use crate::config::{ChainConfig, HandlerConfig, validate_chain_config};
use crate::error::{RuntimeError, RuntimeResult};

/// A chain built from configuration, together with its entry point.
#[derive(Debug)]
pub struct ChainAssembly {
    head: Handler<str, String>,
    entry: Option<String>,
}

impl ChainAssembly {
    /// The first handler in the chain.
    pub fn head(&self) -> &Handler<str, String> {
        &self.head
    }

    /// The handler where dispatch should start.
    ///
    /// This is the configured entry if one was set, otherwise the head.
    pub fn entry(&self) -> &Handler<str, String> {
        self.entry
            .as_deref()
            .and_then(|name| self.head.find(name))
            .unwrap_or(&self.head)
    }

    /// Gives up the wrapper and returns the head.
    pub fn into_head(self) -> Handler<str, String> {
        self.head
    }
}

/// Validates `config` and links its handlers in order.
pub fn assemble(config: &ChainConfig) -> RuntimeResult<ChainAssembly> {
    validate_chain_config(config)?;

    let shared = Template::new(config.template.as_str());
    let mut handlers = config
        .handlers
        .iter()
        .map(|handler| build_handler(handler, &shared));

    let mut head = handlers.next().ok_or(RuntimeError::EmptyChain)?;
    let mut tail = &mut head;
    for handler in handlers {
        tail = tail.set_next(handler);
    }

    info!(
        handlers = head.chain_len(),
        entry = config.entry.as_deref().unwrap_or(head.name()),
        "Chain assembled"
    );

    Ok(ChainAssembly {
        head,
        entry: config.entry.clone(),
    })
}

fn build_handler(config: &HandlerConfig, shared: &Template) -> Handler<str, String> {
    let template = config
        .template
        .as_deref()
        .map_or_else(|| shared.clone(), Template::new);

    debug!(
        handler = %config.name,
        accepts = ?config.accepts,
        template = %template,
        "Building handler"
    );

    Handler::accepting(config.name.clone(), config.accepts.iter().cloned(), template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use handoff_core::Outcome;

    fn zoo() -> ChainConfig {
        ChainConfig {
            handlers: vec![
                HandlerConfig::new("Monkey", ["Banana"]),
                HandlerConfig::new("Squirrel", ["Nut"]),
                HandlerConfig::new("Dog", ["Meatball"]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_links_in_listed_order() {
        let chain = assemble(&zoo()).unwrap();
        let names: Vec<_> = chain.head().links().map(Handler::name).collect();
        assert_eq!(names, ["Monkey", "Squirrel", "Dog"]);
        assert_eq!(chain.entry().name(), "Monkey");
    }

    #[test]
    fn test_entry_mid_chain() {
        let mut config = zoo();
        config.entry = Some("Squirrel".to_string());
        let chain = assemble(&config).unwrap();
        let entry = chain.entry();

        assert_eq!(
            entry.handle("Nut"),
            Outcome::Handled("Squirrel: I'll eat the Nut.".to_string())
        );
        assert!(entry.handle("Banana").is_unhandled());
        assert!(chain.head().handle("Banana").is_handled());
    }

    #[test]
    fn test_handler_template_override() {
        let mut config = zoo();
        config.template = "{handler} takes the {request}".to_string();
        config.handlers[2].template = Some("Woof! ({request})".to_string());
        let chain = assemble(&config).unwrap();

        assert_eq!(
            chain.head().handle("Nut").handled().as_deref(),
            Some("Squirrel takes the Nut")
        );
        assert_eq!(
            chain.head().handle("Meatball").handled().as_deref(),
            Some("Woof! (Meatball)")
        );
    }

    #[test]
    fn test_multiple_accepted_values() {
        let config = ChainConfig {
            handlers: vec![HandlerConfig::new("Goat", ["Hay", "Paper"])],
            ..Default::default()
        };
        let chain = assemble(&config).unwrap().into_head();

        assert!(chain.handle("Hay").is_handled());
        assert!(chain.handle("Paper").is_handled());
        assert!(chain.handle("Tin can").is_unhandled());
    }

    #[test]
    fn test_empty_chain() {
        let result = assemble(&ChainConfig::default());
        assert!(matches!(result, Err(RuntimeError::EmptyChain)));
    }

    #[test]
    fn test_unknown_entry() {
        let mut config = zoo();
        config.entry = Some("Parrot".to_string());

        let result = assemble(&config);
        assert!(matches!(
            result,
            Err(RuntimeError::Config(ConfigError::UnknownEntry(_)))
        ));
    }
}
