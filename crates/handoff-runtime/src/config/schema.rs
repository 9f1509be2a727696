//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use handoff_core::Template;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HandoffConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The handlers to link, in order.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Requests a driver should submit to the entry handler.
    #[serde(default)]
    pub requests: Vec<String>,
}

// =============================================================================
// Chain
// =============================================================================

/// Chain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Handlers in successor order: each one links to the next.
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,

    /// Name of the handler where dispatch starts. Defaults to the first one.
    #[serde(default)]
    pub entry: Option<String>,

    /// Reply template shared by handlers that don't set their own.
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            entry: None,
            template: default_template(),
        }
    }
}

fn default_template() -> String {
    Template::DEFAULT.to_string()
}

/// A single handler in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Unique name, also substituted for `{handler}` in the reply.
    pub name: String,

    /// Requests this handler recognizes, compared exactly.
    #[serde(default)]
    pub accepts: Vec<String>,

    /// Overrides the chain-wide reply template.
    #[serde(default)]
    pub template: Option<String>,
}

impl HandlerConfig {
    /// Creates a handler entry using the chain-wide template.
    pub fn new<I>(name: impl Into<String>, accepts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            accepts: accepts.into_iter().map(Into::into).collect(),
            template: None,
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `full` without it.
    Json,
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    File,
}

/// Which span lifecycle events to log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, required when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread ids in each line.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include file and line of the call site.
    #[serde(default)]
    pub file_location: bool,

    /// Per-module levels, e.g. `handoff_core = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}
