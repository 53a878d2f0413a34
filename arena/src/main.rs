//! Arena - batch runner for UCT self-play
//!
//! Plays a configurable number of games in which both sides are driven by the
//! same search, then prints who started and who won:
//! 1. Loads config.toml (plus env and CLI overrides)
//! 2. Builds every game from the registry
//! 3. Prints the batch summary and optionally writes it as JSON

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod batch;
mod config;
mod stats;

use crate::batch::Arena;
use crate::config::{Cli, Config};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    engine_games::register_all_games();
    if !engine_core::is_registered(&config.game_type) {
        let mut known = engine_core::list_registered_games();
        known.sort();
        anyhow::bail!(
            "unknown game type '{}' (registered: {})",
            config.game_type,
            known.join(", ")
        );
    }

    let stats_file = config.stats_file.clone();
    let mut arena = Arena::new(config);
    let summary = arena.run()?;

    println!("{summary}");

    if let Some(path) = stats_file {
        summary
            .write_json(&path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        info!(path = %path.display(), "Wrote batch summary");
    }

    info!(
        games = summary.games,
        runtime_seconds = summary.runtime_seconds,
        "Batch complete"
    );

    Ok(())
}
