//! Game registration for the UCT arena
//!
//! This crate provides a single initialization point for registering all
//! available games with the engine-core registry.
//!
//! # Usage
//!
//! ```rust
//! use engine_games::register_all_games;
//!
//! // Call once at startup - safe to call multiple times
//! register_all_games();
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Register all available games with the engine-core registry.
///
/// This function uses `std::sync::Once` to ensure registration only
/// happens once, even if called multiple times. Safe to call from
/// multiple threads.
///
/// Currently registers:
/// - Nim (`"nim"`)
/// - Ledge (`"ledge"`)
pub fn register_all_games() {
    INIT.call_once(|| {
        games_nim::register_nim();
        games_ledge::register_ledge();
    });
}

// Re-export individual registration functions for advanced use cases
pub use games_ledge::register_ledge;
pub use games_nim::register_nim;
