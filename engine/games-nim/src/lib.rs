//! Single-heap Nim for the UCT arena
//!
//! Two players alternately remove between `min_take` and `max_take` stones
//! from one heap. The player who takes the last stone wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{create_game, GameParams};
//! use games_nim::register_nim;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! // Register the game with the global registry
//! register_nim();
//!
//! let mut params = GameParams::new();
//! params.insert("stones".into(), toml::Value::Integer(10));
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let game = create_game("nim", &params, &mut rng).expect("nim should be registered");
//! assert_eq!(game.to_string(), "Stones left: 10, take 1 - 3");
//! ```

use std::fmt;

use engine_core::typed::{DecodeError, Game, GameError, MoveCodec, StartingPlayer, StateKey};
use engine_core::{register_game, ErasedGame, GameAdapter, GameParams};
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use tracing::warn;

/// Registry tag
pub const ENV_ID: &str = "nim";

/// Register Nim with the global game registry
///
/// Call this function once at startup to make Nim available via
/// `create_game("nim", ...)`.
pub fn register_nim() {
    register_game(ENV_ID.to_string(), nim_factory);
}

fn nim_factory(
    params: &GameParams,
    rng: &mut ChaCha20Rng,
) -> Result<Box<dyn ErasedGame>, GameError> {
    let config = NimConfig::from_params(params)?;
    let game = Nim::from_config(&config, rng)?;
    Ok(Box::new(GameAdapter::new(ENV_ID, game)))
}

/// Parameters read from the `[game]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NimConfig {
    #[serde(default)]
    pub starting_player: StartingPlayer,
    #[serde(default = "d_stones")]
    pub stones: i64,
    #[serde(default = "d_max_take")]
    pub max_take: i64,
    #[serde(default = "d_min_take")]
    pub min_take: i64,
}

fn d_stones() -> i64 {
    7
}
fn d_max_take() -> i64 {
    3
}
fn d_min_take() -> i64 {
    1
}

impl Default for NimConfig {
    fn default() -> Self {
        Self {
            starting_player: StartingPlayer::default(),
            stones: d_stones(),
            max_take: d_max_take(),
            min_take: d_min_take(),
        }
    }
}

impl NimConfig {
    /// Deserialize from raw game parameters. Unknown keys are ignored.
    pub fn from_params(params: &GameParams) -> Result<Self, GameError> {
        toml::Value::Table(params.clone())
            .try_into()
            .map_err(|e: toml::de::Error| GameError::invalid_config(ENV_ID, e.to_string()))
    }
}

/// Nim game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    stones: u32,
    max_take: u32,
    min_take: u32,
    first_to_move: bool,
}

impl Nim {
    /// Create a heap of `stones` with the given take limits.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidConfig` unless `max_take >= min_take >= 1` and
    /// `stones >= 1`.
    pub fn new(
        stones: u32,
        max_take: u32,
        min_take: u32,
        first_player_to_move: bool,
    ) -> Result<Self, GameError> {
        if stones == 0 {
            return Err(GameError::invalid_config(ENV_ID, "stones must be at least 1"));
        }
        if min_take == 0 {
            return Err(GameError::invalid_config(ENV_ID, "min_take must be at least 1"));
        }
        if max_take < min_take {
            return Err(GameError::invalid_config(
                ENV_ID,
                format!("max_take ({max_take}) is below min_take ({min_take})"),
            ));
        }
        Ok(Self {
            stones,
            max_take,
            min_take,
            first_to_move: first_player_to_move,
        })
    }

    /// Build from configuration, resolving the starting player with `rng`.
    ///
    /// A heap below one stone is clamped to one.
    pub fn from_config(config: &NimConfig, rng: &mut ChaCha20Rng) -> Result<Self, GameError> {
        let stones = if config.stones < 1 {
            warn!(stones = config.stones, "Too few stones, clamping to 1");
            1
        } else {
            u32::try_from(config.stones).map_err(|_| {
                GameError::invalid_config(ENV_ID, format!("stones out of range: {}", config.stones))
            })?
        };
        let take = |name: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                GameError::invalid_config(ENV_ID, format!("{name} out of range: {value}"))
            })
        };
        let max_take = take("max_take", config.max_take)?;
        let min_take = take("min_take", config.min_take)?;

        Self::new(
            stones,
            max_take,
            min_take,
            config.starting_player.resolve(rng),
        )
    }

    pub fn stones(&self) -> u32 {
        self.stones
    }

    /// Smallest legal take in the current position
    fn lowest_take(&self) -> u32 {
        self.min_take.min(self.stones)
    }

    /// Largest legal take in the current position
    fn highest_take(&self) -> u32 {
        self.max_take.min(self.stones)
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stones left: {}, take {} - {}",
            self.stones,
            self.lowest_take(),
            self.highest_take()
        )
    }
}

impl Game for Nim {
    /// Number of stones to take
    type Move = u32;

    fn is_completed(&self) -> bool {
        self.stones == 0
    }

    fn state_key(&self) -> StateKey {
        StateKey::new(self.first_to_move, self.stones.to_be_bytes().to_vec())
    }

    fn legal_moves(&self) -> Vec<u32> {
        if self.is_completed() {
            return Vec::new();
        }
        (self.lowest_take()..=self.highest_take()).collect()
    }

    fn apply(&mut self, mv: &u32) -> Result<(), GameError> {
        if self.is_completed() {
            return Err(GameError::illegal_move(mv, "no stones left"));
        }
        let (low, high) = (self.lowest_take(), self.highest_take());
        if *mv < low || *mv > high {
            return Err(GameError::illegal_move(
                mv,
                format!("must take between {low} and {high} of {} stones", self.stones),
            ));
        }
        self.stones -= mv;
        self.first_to_move = !self.first_to_move;
        Ok(())
    }

    fn first_player_to_move(&self) -> bool {
        self.first_to_move
    }
}

impl MoveCodec for Nim {
    fn encode_move(mv: &u32, out: &mut Vec<u8>) {
        out.extend_from_slice(&mv.to_le_bytes());
    }

    fn decode_move(buf: &[u8]) -> Result<u32, DecodeError> {
        let bytes: [u8; 4] = buf.try_into().map_err(|_| DecodeError::InvalidLength {
            expected: 4,
            actual: buf.len(),
        })?;
        Ok(u32::from_le_bytes(bytes))
    }
}
