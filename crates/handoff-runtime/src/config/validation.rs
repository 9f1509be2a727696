//! Configuration validation utilities.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{ChainConfig, HandlerConfig, HandoffConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &HandoffConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_chain_config(&config.chain)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "File log output requires logging.file_path",
        ));
    }
    Ok(())
}

/// Validates the chain: unique non-empty names and a resolvable entry.
pub fn validate_chain_config(chain: &ChainConfig) -> ConfigResult<()> {
    if chain.template.is_empty() {
        return Err(ConfigError::validation("Reply template cannot be empty"));
    }

    let mut seen = HashSet::new();
    for handler in &chain.handlers {
        validate_handler_config(handler)?;

        if !seen.insert(handler.name.as_str()) {
            return Err(ConfigError::DuplicateHandler(handler.name.clone()));
        }
    }

    if let Some(entry) = &chain.entry {
        if !seen.contains(entry.as_str()) {
            return Err(ConfigError::UnknownEntry(entry.clone()));
        }
    }

    Ok(())
}

/// Validates a single handler entry.
fn validate_handler_config(handler: &HandlerConfig) -> ConfigResult<()> {
    if handler.name.trim().is_empty() {
        return Err(ConfigError::validation("Handler name cannot be empty"));
    }

    if handler.accepts.is_empty() {
        return Err(ConfigError::validation(format!(
            "Handler '{}' accepts nothing",
            handler.name
        )));
    }

    if handler.template.as_deref() == Some("") {
        return Err(ConfigError::validation(format!(
            "Handler '{}' has an empty reply template",
            handler.name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn zoo() -> ChainConfig {
        ChainConfig {
            handlers: vec![
                HandlerConfig::new("Monkey", ["Banana"]),
                HandlerConfig::new("Squirrel", ["Nut"]),
                HandlerConfig::new("Dog", ["Meatball"]),
            ],
            entry: Some("Squirrel".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_empty_config() {
        let config = HandoffConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zoo() {
        assert!(validate_chain_config(&zoo()).is_ok());
    }

    #[test]
    fn test_validate_duplicate_handler() {
        let mut chain = zoo();
        chain.handlers.push(HandlerConfig::new("Dog", ["Bone"]));

        let result = validate_chain_config(&chain);
        assert!(matches!(result, Err(ConfigError::DuplicateHandler(name)) if name == "Dog"));
    }

    #[test]
    fn test_validate_unknown_entry() {
        let mut chain = zoo();
        chain.entry = Some("Parrot".to_string());

        let result = validate_chain_config(&chain);
        assert!(matches!(result, Err(ConfigError::UnknownEntry(name)) if name == "Parrot"));
    }

    #[test]
    fn test_validate_handler_fields() {
        let mut chain = zoo();
        chain.handlers[0].name = "  ".to_string();
        assert!(validate_chain_config(&chain).is_err());

        let mut chain = zoo();
        chain.handlers[1].accepts.clear();
        assert!(validate_chain_config(&chain).is_err());

        let mut chain = zoo();
        chain.handlers[2].template = Some(String::new());
        assert!(validate_chain_config(&chain).is_err());

        let mut chain = zoo();
        chain.template.clear();
        assert!(validate_chain_config(&chain).is_err());
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = HandoffConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some(PathBuf::from("handoff.log"));
        assert!(validate_config(&config).is_ok());
    }
}
