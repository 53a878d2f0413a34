//! Core traits and types for the UCT arena game engine
//!
//! This crate provides the fundamental abstractions the search is built on:
//! - `Game`: Typed game contract (six operations) for ergonomic game development
//! - `ErasedGame`: Object-safe interface whose moves travel as bytes
//! - `GameAdapter`: Automatic conversion from typed to erased interface
//! - `Registry`: Game-type tag to factory mapping used by the batch runner

pub mod adapter;
pub mod erased;
pub mod registry;
pub mod typed;

// Re-export main types for convenience
pub use adapter::GameAdapter;
pub use erased::{ErasedGame, ErasedMove};
pub use registry::{
    clear_registry, create_game, is_registered, list_registered_games, register_game, GameFactory,
    GameParams,
};
pub use typed::{DecodeError, Game, GameError, MoveCodec, StartingPlayer, StateKey};
