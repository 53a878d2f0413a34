//! Configuration for the arena runner
//!
//! Settings come from config.toml with environment variable overrides (see
//! `engine-config`). CLI arguments take highest priority, followed by env
//! vars, then config.toml, then the built-in defaults.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use engine_config::{load_config, load_from_path, CentralConfig, TableReset};
use engine_core::GameParams;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// File name used when `--stats-file` is given without a path
pub const DEFAULT_STATS_FILE: &str = "arena_stats.json";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "arena")]
#[command(about = "Plays batches of MCTS-vs-MCTS games and reports who wins")]
#[command(
    long_about = "Plays a batch of games where both sides are driven by the same UCT
search and prints how often the first player, the second player and the
starting player won.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Cli {
    /// Explicit config file (otherwise ARENA_CONFIG, ./config.toml, ../config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Game type to play (e.g., nim, ledge)
    #[arg(long, value_name = "TYPE")]
    pub game: Option<String>,

    /// Number of games in the batch
    #[arg(long, value_name = "N")]
    pub games: Option<u32>,

    /// Simulations per move
    #[arg(long, value_name = "N")]
    pub simulations: Option<u32>,

    /// UCT exploration constant
    #[arg(long, value_name = "C")]
    pub exploration: Option<f64>,

    /// When to clear the search statistics (per_move, per_game, never)
    #[arg(long, value_name = "POLICY")]
    pub table_reset: Option<TableReset>,

    /// RNG seed for a reproducible batch
    #[arg(long, value_name = "S")]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "L")]
    pub log_level: Option<String>,

    /// Log every move
    #[arg(long)]
    pub verbose: bool,

    /// Write the batch summary as JSON; without a path it goes to
    /// <data_dir>/arena_stats.json
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub stats_file: Option<Option<PathBuf>>,
}

/// Fully resolved settings for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub game_type: String,
    pub game_params: GameParams,
    pub games: u32,
    pub simulations: u32,
    pub exploration: f64,
    pub time_limit: Option<Duration>,
    pub table_reset: TableReset,
    pub seed: Option<u64>,
    pub log_level: String,
    pub verbose: bool,
    pub stats_file: Option<PathBuf>,
}

impl Config {
    /// Load the file configuration the CLI points at and apply the CLI on top.
    ///
    /// An explicit `--config` path must exist; the implicit search falls
    /// back to defaults silently.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let central = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    bail!("config file {} does not exist", path.display());
                }
                load_from_path(path)
            }
            None => load_config(),
        };
        Ok(Self::merge(central, cli))
    }

    /// Apply CLI overrides to an already loaded configuration.
    pub fn merge(central: CentralConfig, cli: Cli) -> Self {
        let stats_file = cli.stats_file.map(|path| {
            path.unwrap_or_else(|| PathBuf::from(&central.common.data_dir).join(DEFAULT_STATS_FILE))
        });

        Self {
            game_type: cli.game.unwrap_or(central.game.game_type),
            game_params: central.game.params,
            games: cli.games.unwrap_or(central.batch.games),
            simulations: cli.simulations.unwrap_or(central.mcts.simulations),
            exploration: cli.exploration.unwrap_or(central.mcts.exploration),
            time_limit: central.mcts.time_limit(),
            table_reset: cli.table_reset.unwrap_or(central.batch.table_reset),
            seed: cli.seed.or(central.common.seed),
            log_level: cli.log_level.unwrap_or(central.common.log_level),
            verbose: cli.verbose || central.batch.verbose,
            stats_file,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.game_type.trim().is_empty() {
            return Err(anyhow!("game type cannot be empty"));
        }

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite, non-negative number, got {}",
                self.exploration
            ));
        }

        self.log_level.parse::<LevelFilter>().map_err(|_| {
            anyhow!(
                "Invalid log_level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )
        })?;

        Ok(())
    }

    /// Search settings for the `mcts` crate
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        let config = mcts::MctsConfig::default().with_exploration(self.exploration);
        match self.time_limit {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        }
    }
}
