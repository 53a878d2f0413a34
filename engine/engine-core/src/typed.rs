//! Typed Game trait providing the contract every searchable game implements
//!
//! The search engine only ever talks to a game through the six operations of
//! [`Game`]. How a game is built (its configuration struct, its starting
//! player) lives outside the trait, in each game crate.

use std::fmt;
use std::hash::Hash;

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;

/// Canonical identity of a decision point.
///
/// The turn flag is part of the identity: the same position with a different
/// player to move is a different node in the statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Whether the first player is the one to move
    pub first_player_to_move: bool,
    /// Deterministic byte encoding of the position
    pub bytes: Vec<u8>,
}

impl StateKey {
    pub fn new(first_player_to_move: bool, bytes: Vec<u8>) -> Self {
        Self {
            first_player_to_move,
            bytes,
        }
    }
}

/// Main trait for game implementations
///
/// Games must be finite, deterministic, perfect-information and strictly
/// turn-alternating between two players.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use engine_core::GameError;
/// # use std::fmt;
///
/// /// Players alternately take one or two sticks; taking the last one wins.
/// #[derive(Debug, Clone)]
/// struct Sticks {
///     left: u8,
///     first_to_move: bool,
/// }
///
/// impl fmt::Display for Sticks {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{} sticks", self.left)
///     }
/// }
///
/// impl Game for Sticks {
///     type Move = u8;
///
///     fn is_completed(&self) -> bool {
///         self.left == 0
///     }
///
///     fn state_key(&self) -> StateKey {
///         StateKey::new(self.first_to_move, vec![self.left])
///     }
///
///     fn legal_moves(&self) -> Vec<u8> {
///         (1..=self.left.min(2)).collect()
///     }
///
///     fn apply(&mut self, mv: &u8) -> Result<(), GameError> {
///         if *mv == 0 || *mv > self.left.min(2) {
///             return Err(GameError::illegal_move(mv, "take one or two sticks"));
///         }
///         self.left -= mv;
///         self.first_to_move = !self.first_to_move;
///         Ok(())
///     }
///
///     fn first_player_to_move(&self) -> bool {
///         self.first_to_move
///     }
/// }
///
/// let mut game = Sticks { left: 3, first_to_move: true };
/// game.apply(&2).unwrap();
/// assert_eq!(game.legal_moves(), vec![1]);
/// ```
pub trait Game: Clone + fmt::Debug + fmt::Display + Send + 'static {
    /// Move type. The search stores moves as table edges and hands them back
    /// to [`Game::apply`]; it never inspects them.
    type Move: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// True once no further moves are legal.
    fn is_completed(&self) -> bool;

    /// Turn flag plus canonical byte encoding of the position.
    fn state_key(&self) -> StateKey;

    /// Legal moves in a stable order.
    ///
    /// Non-empty iff the game is not completed. The same state must always
    /// report the same moves in the same order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move and hand the turn to the other player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalMove`] when `mv` is not in
    /// [`Game::legal_moves`] for the current state.
    fn apply(&mut self, mv: &Self::Move) -> Result<(), GameError>;

    /// Whose turn it currently is.
    fn first_player_to_move(&self) -> bool;
}

/// Byte encoding for moves, used by the erased layer.
pub trait MoveCodec: Game {
    /// Encode a move to bytes
    fn encode_move(mv: &Self::Move, out: &mut Vec<u8>);

    /// Decode a move from bytes
    fn decode_move(buf: &[u8]) -> Result<Self::Move, DecodeError>;
}

/// Who opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "i64")]
pub enum StartingPlayer {
    #[default]
    First,
    Second,
    /// Coin flip per game
    Random,
}

impl From<i64> for StartingPlayer {
    /// 1 and 2 select a player, anything else picks at random.
    fn from(code: i64) -> Self {
        match code {
            1 => StartingPlayer::First,
            2 => StartingPlayer::Second,
            _ => StartingPlayer::Random,
        }
    }
}

impl StartingPlayer {
    /// Returns true when the first player opens.
    pub fn resolve(self, rng: &mut ChaCha20Rng) -> bool {
        match self {
            StartingPlayer::First => true,
            StartingPlayer::Second => false,
            StartingPlayer::Random => rng.gen_bool(0.5),
        }
    }
}

/// Errors reported by game implementations and the registry
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },
    #[error("Invalid {game} configuration: {message}")]
    InvalidConfig { game: String, message: String },
    #[error("Unknown game type '{0}'")]
    UnknownGame(String),
    #[error("Failed to decode move: {0}")]
    Decode(#[from] DecodeError),
}

impl GameError {
    pub fn illegal_move(mv: impl fmt::Display, reason: impl Into<String>) -> Self {
        GameError::IllegalMove {
            mv: mv.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(game: &str, message: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            game: game.to_string(),
            message: message.into(),
        }
    }
}

/// Error type for decoding operations
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid buffer length: expected {expected} but got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Corrupted data: {0}")]
    CorruptedData(String),
}
