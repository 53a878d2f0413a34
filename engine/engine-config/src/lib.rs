//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic for the
//! arena binary and anything else that needs the shared settings.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`ARENA_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! ARENA_<SECTION>_<KEY>=value
//!
//! Examples:
//!     ARENA_COMMON_LOG_LEVEL=debug
//!     ARENA_COMMON_SEED=7
//!     ARENA_GAME_TYPE=ledge
//!     ARENA_MCTS_SIMULATIONS=2000
//!     ARENA_BATCH_TABLE_RESET=never
//! ```
//!
//! Game parameters other than `type` are only read from the file.

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
