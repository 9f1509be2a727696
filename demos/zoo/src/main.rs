//! Zoo Example
//!
//! Offers food to a chain of animals. Each animal eats what it likes and
//! passes everything else along:
//!
//! ```text
//! Monkey (Banana) ──▶ Squirrel (Nut) ──▶ Dog (Meatball)
//! ```
//!
//! The built-in chain can be replaced or extended with a `handoff.toml`, a
//! `--config` file, or `HANDOFF_` environment variables.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package zoo
//! cargo run --package zoo -- --entry Squirrel Banana Nut
//! HANDOFF_CHAIN__ENTRY=Dog cargo run --package zoo -- -v
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use handoff::prelude::*;
use handoff::runtime::config::{ChainConfig, HandlerConfig};
use handoff::runtime::logging;
use tracing::info;

/// Offer food to a chain of animals
#[derive(Parser)]
#[command(name = "zoo")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Animal that is asked first
    #[arg(short, long, value_name = "NAME")]
    entry: Option<String>,

    /// Configuration profile
    #[arg(short, long)]
    profile: Option<String>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Food to offer, replacing the configured requests
    requests: Vec<String>,
}

fn zoo_defaults() -> HandoffConfig {
    HandoffConfig {
        chain: ChainConfig {
            handlers: vec![
                HandlerConfig::new("Monkey", ["Banana"]),
                HandlerConfig::new("Squirrel", ["Nut"]),
                HandlerConfig::new("Dog", ["Meatball"]),
            ],
            ..Default::default()
        },
        requests: ["Nut", "Banana", "Coffee cup"].map(String::from).to_vec(),
        ..Default::default()
    }
}

fn load_config(cli: &Cli) -> Result<HandoffConfig> {
    let mut loader = ConfigLoader::new().defaults(zoo_defaults());

    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &cli.profile {
        loader = loader.profile(profile);
    }
    if let Some(entry) = &cli.entry {
        loader = loader.set("chain.entry", entry);
    }
    if !cli.requests.is_empty() {
        loader = loader.set("requests", &cli.requests);
    }
    match cli.verbose {
        0 => {}
        1 => loader = loader.set("logging.level", "debug"),
        _ => loader = loader.set("logging.level", "trace"),
    }

    loader.load().context("Failed to load configuration")
}

/// Offers every request to `entry` and prints what became of it.
fn feed(entry: &Handler<str, String>, requests: &[String]) {
    for request in requests {
        println!("Client: Who wants a {request}?");
        match entry.handle(request) {
            Outcome::Handled(reply) => println!("  {reply}"),
            Outcome::Unhandled => println!("  {request} was left untouched."),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    logging::init_from_config(&config.logging);

    let chain = assemble(&config.chain).context("Failed to assemble the chain")?;
    info!(
        entry = chain.entry().name(),
        requests = config.requests.len(),
        "Feeding time"
    );

    feed(chain.entry(), &config.requests);

    Ok(())
}
