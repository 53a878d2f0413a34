//! Static game registry mapping game-type tags to factories
//!
//! This module provides a thread-safe registry system that allows games to be
//! registered at startup and built at runtime from their tag plus a table of
//! typed parameters taken from the `[game]` section of the configuration.

use once_cell::sync::Lazy;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::erased::ErasedGame;
use crate::typed::GameError;

/// Raw parameters for a game factory (everything in `[game]` except `type`)
pub type GameParams = toml::Table;

/// Factory function type for creating game instances
///
/// The RNG is used for random starting players and random initial layouts.
pub type GameFactory =
    fn(&GameParams, &mut ChaCha20Rng) -> Result<Box<dyn ErasedGame>, GameError>;

/// Thread-safe registry mapping env_id to game factory functions
static REGISTRY: Lazy<Mutex<HashMap<String, GameFactory>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Register a game with the global registry
///
/// This function should typically be called from game crate initialization.
///
/// # Arguments
///
/// * `env_id` - Unique game-type tag (e.g., "nim")
/// * `factory` - Function that builds new instances of the game
pub fn register_game(env_id: String, factory: GameFactory) {
    let mut registry = REGISTRY.lock().unwrap();
    if registry.contains_key(&env_id) {
        warn!(env_id = %env_id, "Overriding existing game registration");
    }
    registry.insert(env_id, factory);
}

/// Create a new game instance by env_id
///
/// # Errors
///
/// Returns `GameError::UnknownGame` if the tag is not registered, or whatever
/// configuration error the game's factory reports.
pub fn create_game(
    env_id: &str,
    params: &GameParams,
    rng: &mut ChaCha20Rng,
) -> Result<Box<dyn ErasedGame>, GameError> {
    // Copy the fn pointer out so the lock is not held while the factory runs
    let factory = {
        let registry = REGISTRY.lock().unwrap();
        registry.get(env_id).copied()
    };

    match factory {
        Some(factory) => factory(params, rng),
        None => {
            warn!(env_id = %env_id, "Attempted to create unregistered game");
            Err(GameError::UnknownGame(env_id.to_string()))
        }
    }
}

/// Get list of all registered environment IDs
pub fn list_registered_games() -> Vec<String> {
    let registry = REGISTRY.lock().unwrap();
    registry.keys().cloned().collect()
}

/// Check if a game is registered
pub fn is_registered(env_id: &str) -> bool {
    let registry = REGISTRY.lock().unwrap();
    registry.contains_key(env_id)
}

/// Clear all registered games (mainly for testing)
pub fn clear_registry() {
    let mut registry = REGISTRY.lock().unwrap();
    registry.clear();
}
