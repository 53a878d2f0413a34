//! Monte Carlo Tree Search with the UCT selection rule.
//!
//! This crate provides a game-agnostic search that works with any game
//! implementing the `engine-core` Game trait, including registry-built
//! `Box<dyn ErasedGame>` instances.
//!
//! # Overview
//!
//! Statistics are kept per state identity, not per tree position: the
//! [`StatsTable`] maps each state key to a [`Node`] holding visit counts and
//! running mean outcomes for every legal move. Each simulation:
//!
//! 1. **Traversal**: From the root, pick moves with UCT through states that
//!    already have a node
//! 2. **Expansion**: The first unknown state gets a node and ends traversal
//! 3. **Rollout**: Uniformly random moves (or a custom [`RolloutPolicy`])
//!    until the game completes
//! 4. **Backpropagation**: Every traversed node folds the outcome into the
//!    move it chose
//!
//! Outcomes are always from the first player's point of view: 1.0 when the
//! first player made the final move. The first player maximises, the second
//! minimises.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{Mcts, MctsConfig};
//! use games_nim::Nim;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = Nim::new(7, 3, 1, true).unwrap();
//! let mut mcts = Mcts::new(MctsConfig::default());
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = mcts.search(&game, 2000, &mut rng).unwrap();
//! assert_eq!(result.action, 3);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration`: UCT constant `c` (default: 1.0, 0.0 = greedy)
//! - `time_limit`: Optional wall-clock cap per search

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod table;

// Re-export main types
pub use config::MctsConfig;
pub use node::{ActionStats, Node, NodeId};
pub use rollout::{RolloutPolicy, UniformRollout};
pub use search::{Mcts, SearchError, SearchResult, SearchStats};
pub use selection::select_action;
pub use table::{StatsTable, TableStats};
