//! Locating and reading config.toml.
//!
//! Whatever file is read, `ARENA_<SECTION>_<KEY>` environment variables are
//! applied on top of it.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ARENA_CONFIG";

/// Fallback locations, relative to the working directory
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// First existing config file: `ARENA_CONFIG`, then each search path.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let explicit = PathBuf::from(&raw);
        if explicit.exists() {
            return Some(explicit);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV_VAR, raw);
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load the arena configuration.
///
/// Uses the first file found by looking at `ARENA_CONFIG`, `./config.toml`
/// and `../config.toml`, or the built-in defaults when none exists.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Using config file");
            load_from_path(&path)
        }
        None => {
            debug!("No config file found, starting from built-in defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Load one config file.
///
/// A file that cannot be read or parsed is reported and replaced by the
/// built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))
        .and_then(|text| {
            toml::from_str::<CentralConfig>(&text)
                .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
        });

    let config = parsed.unwrap_or_else(|reason| {
        warn!("{reason}; falling back to built-in defaults");
        CentralConfig::default()
    });
    apply_env_overrides(config)
}

/// Expands one `ARENA_*` variable into a field assignment
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, TableReset, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = v,
                Err(_) => warn!("Ignoring {}={}: cannot parse value", $key, raw),
            }
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = Some(v),
                Err(_) => warn!("Ignoring {}={}: cannot parse value", $key, raw),
            }
        }
    };
}

/// Overwrite fields from `ARENA_<SECTION>_<KEY>` variables.
///
/// Values that fail to parse are logged and skipped.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.data_dir, "ARENA_COMMON_DATA_DIR");
    env_override!(config, common.log_level, "ARENA_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "ARENA_COMMON_SEED", optional_parse);

    // Game
    env_override!(config, game.game_type, "ARENA_GAME_TYPE");

    // MCTS
    env_override!(config, mcts.simulations, "ARENA_MCTS_SIMULATIONS", parse);
    env_override!(config, mcts.exploration, "ARENA_MCTS_EXPLORATION", parse);
    env_override!(
        config,
        mcts.time_limit_ms,
        "ARENA_MCTS_TIME_LIMIT_MS",
        parse
    );

    // Batch
    env_override!(config, batch.games, "ARENA_BATCH_GAMES", parse);
    env_override!(
        config,
        batch.table_reset,
        "ARENA_BATCH_TABLE_RESET",
        parse
    );
    env_override!(config, batch.verbose, "ARENA_BATCH_VERBOSE", parse);

    config
}
