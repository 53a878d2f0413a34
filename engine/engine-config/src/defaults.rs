//! Built-in defaults, embedded from config.defaults.toml at compile time.
//!
//! The TOML file at the workspace root is the single source of default
//! values; the serde `default` functions in `structs` read them from here.

use once_cell::sync::Lazy;
use serde::Deserialize;

const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

static DEFAULTS: Lazy<DefaultsFile> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("embedded config.defaults.toml must parse")
});

// Every key is required here, unlike the user-facing structs.
#[derive(Debug, Deserialize)]
struct DefaultsFile {
    common: CommonDefaults,
    game: GameDefaults,
    mcts: MctsDefaults,
    batch: BatchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    #[serde(rename = "type")]
    game_type: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    simulations: u32,
    exploration: f64,
    time_limit_ms: u64,
}

#[derive(Debug, Deserialize)]
struct BatchDefaults {
    games: u32,
    table_reset: String,
    verbose: bool,
}

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Game
pub fn game_type() -> &'static str {
    &DEFAULTS.game.game_type
}

// MCTS
pub fn simulations() -> u32 {
    DEFAULTS.mcts.simulations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}

// Batch
pub fn games() -> u32 {
    DEFAULTS.batch.games
}
pub fn table_reset() -> &'static str {
    &DEFAULTS.batch.table_reset
}
pub fn verbose() -> bool {
    DEFAULTS.batch.verbose
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_and_game_defaults() {
        assert_eq!(data_dir(), "./data");
        assert_eq!(log_level(), "info");
        assert_eq!(game_type(), "nim");
    }

    #[test]
    fn test_mcts_defaults() {
        assert_eq!(simulations(), 500);
        assert!((exploration() - 1.0).abs() < f64::EPSILON);
        assert_eq!(time_limit_ms(), 0);
    }

    #[test]
    fn test_batch_defaults() {
        assert_eq!(games(), 100);
        assert_eq!(table_reset(), "per_game");
        assert!(!verbose());
    }
}
