//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_game_type() -> String {
    defaults::game_type().into()
}
fn d_simulations() -> u32 {
    defaults::simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_table_reset() -> TableReset {
    defaults::table_reset()
        .parse()
        .expect("config.defaults.toml should hold a valid table_reset")
}
fn d_verbose() -> bool {
    defaults::verbose()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// RNG seed for the whole run; `None` draws one from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            log_level: defaults::log_level().into(),
            seed: None,
        }
    }
}

/// Which game to play and its parameters
///
/// Every key besides `type` is collected into `params` and handed to the
/// game's registry factory, which interprets them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(rename = "type", default = "d_game_type")]
    pub game_type: String,
    #[serde(flatten)]
    pub params: toml::Table,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_type: defaults::game_type().into(),
            params: toml::Table::new(),
        }
    }
}

/// Search configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MctsConfig {
    /// Simulations per move
    #[serde(default = "d_simulations")]
    pub simulations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// Per-search wall-clock cap in milliseconds, 0 = none
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: defaults::simulations(),
            exploration: defaults::exploration(),
            time_limit_ms: defaults::time_limit_ms(),
        }
    }
}

impl MctsConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}

/// Batch runner configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_table_reset")]
    pub table_reset: TableReset,
    /// Log every move
    #[serde(default = "d_verbose")]
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            table_reset: d_table_reset(),
            verbose: defaults::verbose(),
        }
    }
}

/// When the batch runner clears the search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableReset {
    /// Before every search
    PerMove,
    /// Before every game
    PerGame,
    /// Never; statistics accumulate over the whole batch
    Never,
}

impl TableReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableReset::PerMove => "per_move",
            TableReset::PerGame => "per_game",
            TableReset::Never => "never",
        }
    }
}

impl FromStr for TableReset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "per_move" => Ok(TableReset::PerMove),
            "per_game" => Ok(TableReset::PerGame),
            "never" => Ok(TableReset::Never),
            other => Err(format!(
                "unknown table reset policy '{other}' (expected per_move, per_game or never)"
            )),
        }
    }
}

impl fmt::Display for TableReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
