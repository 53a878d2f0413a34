//! Coin-sliding ledge game for the UCT arena
//!
//! The board is a row of cells holding nothing, a copper coin or the single
//! gold coin. Cell 0 is the ledge. On each turn a player either pops the coin
//! sitting on the ledge, or slides any coin left into an empty cell without
//! jumping over another coin. Whoever pops the gold coin wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{create_game, GameParams};
//! use games_ledge::register_ledge;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! register_ledge();
//!
//! let mut params = GameParams::new();
//! params.insert("board".into(), toml::Value::try_from(vec![0, 1, 0, 2]).unwrap());
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let game = create_game("ledge", &params, &mut rng).expect("ledge should be registered");
//! assert_eq!(game.to_string(), "[0 1 0 2]");
//! ```

use std::fmt;

use engine_core::typed::{DecodeError, Game, GameError, MoveCodec, StartingPlayer, StateKey};
use engine_core::{register_game, ErasedGame, GameAdapter, GameParams};
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use tracing::warn;

/// Registry tag
pub const ENV_ID: &str = "ledge";

pub const EMPTY: u8 = 0;
pub const COPPER: u8 = 1;
pub const GOLD: u8 = 2;

/// Layout used when a configured board is unusable
pub const FALLBACK_BOARD: [u8; 4] = [COPPER, EMPTY, EMPTY, GOLD];

/// Longest board a move can address
const MAX_CELLS: usize = u8::MAX as usize + 1;

/// Register Ledge with the global game registry
pub fn register_ledge() {
    register_game(ENV_ID.to_string(), ledge_factory);
}

fn ledge_factory(
    params: &GameParams,
    rng: &mut ChaCha20Rng,
) -> Result<Box<dyn ErasedGame>, GameError> {
    let config = LedgeConfig::from_params(params)?;
    let game = Ledge::from_config(&config, rng)?;
    Ok(Box::new(GameAdapter::new(ENV_ID, game)))
}

/// Parameters read from the `[game]` section
///
/// An explicit `board` wins over `length` + `copper_coins`. With neither, the
/// fallback board is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LedgeConfig {
    #[serde(default)]
    pub starting_player: StartingPlayer,
    #[serde(default)]
    pub board: Option<Vec<i64>>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub copper_coins: i64,
}

impl LedgeConfig {
    /// Deserialize from raw game parameters. Unknown keys are ignored.
    pub fn from_params(params: &GameParams) -> Result<Self, GameError> {
        toml::Value::Table(params.clone())
            .try_into()
            .map_err(|e: toml::de::Error| GameError::invalid_config(ENV_ID, e.to_string()))
    }
}

/// A ledge move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgeMove {
    /// Remove the coin on the ledge
    Pop,
    /// Move the coin at `from` left to the empty cell `to`
    Slide { from: u8, to: u8 },
}

impl fmt::Display for LedgeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgeMove::Pop => f.write_str("pop"),
            LedgeMove::Slide { from, to } => write!(f, "slide {from} -> {to}"),
        }
    }
}

/// Ledge game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledge {
    board: Vec<u8>,
    first_to_move: bool,
    gold_popped: bool,
}

impl Ledge {
    /// Start a game on `board`.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidConfig` if the board is longer than 256 cells,
    /// holds a value other than 0, 1 or 2, or does not hold exactly one gold
    /// coin.
    pub fn new(board: Vec<u8>, first_player_to_move: bool) -> Result<Self, GameError> {
        validate_board(&board).map_err(|msg| GameError::invalid_config(ENV_ID, msg))?;
        Ok(Self {
            board,
            first_to_move: first_player_to_move,
            gold_popped: false,
        })
    }

    /// Build from configuration, drawing the starting player and any random
    /// layout from `rng`.
    pub fn from_config(config: &LedgeConfig, rng: &mut ChaCha20Rng) -> Result<Self, GameError> {
        let board = match (&config.board, config.length) {
            (Some(cells), _) => configured_board(cells),
            (None, Some(length)) => random_board(length, config.copper_coins, rng)?,
            (None, None) => FALLBACK_BOARD.to_vec(),
        };
        Self::new(board, config.starting_player.resolve(rng))
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }
}

fn validate_board(board: &[u8]) -> Result<(), String> {
    if board.len() > MAX_CELLS {
        return Err(format!(
            "board has {} cells, at most {MAX_CELLS} are supported",
            board.len()
        ));
    }
    if let Some(bad) = board.iter().find(|&&c| c > GOLD) {
        return Err(format!("bad coin value {bad}"));
    }
    let gold = board.iter().filter(|&&c| c == GOLD).count();
    if gold != 1 {
        return Err(format!("expected exactly one gold coin, found {gold}"));
    }
    Ok(())
}

/// Explicit board from config, replaced by the fallback layout when unusable.
fn configured_board(cells: &[i64]) -> Vec<u8> {
    let checked = cells
        .iter()
        .map(|&c| u8::try_from(c).map_err(|_| format!("bad coin value {c}")))
        .collect::<Result<Vec<u8>, String>>()
        .and_then(|board| validate_board(&board).map(|()| board));

    match checked {
        Ok(board) => board,
        Err(problem) => {
            warn!(
                board = ?cells,
                fallback = ?FALLBACK_BOARD,
                "Bad initial board ({}), overriding board definition",
                problem
            );
            FALLBACK_BOARD.to_vec()
        }
    }
}

/// Random layout: one gold coin plus distinct copper cells.
fn random_board(
    length: i64,
    copper_coins: i64,
    rng: &mut ChaCha20Rng,
) -> Result<Vec<u8>, GameError> {
    let length = usize::try_from(length)
        .ok()
        .filter(|l| (1..=MAX_CELLS).contains(l))
        .ok_or_else(|| {
            GameError::invalid_config(
                ENV_ID,
                format!("length must be between 1 and {MAX_CELLS}, got {length}"),
            )
        })?;

    let max_copper = length - 1;
    let copper = if copper_coins < 0 {
        warn!(copper_coins, "Negative amount of copper coins, clamping to 0");
        0
    } else if copper_coins as u64 > max_copper as u64 {
        warn!(
            copper_coins,
            clamped = max_copper,
            "Too many copper coins, clamping to length - 1"
        );
        max_copper
    } else {
        copper_coins as usize
    };

    let mut board = vec![EMPTY; length];
    let gold = rng.gen_range(0..length);
    board[gold] = GOLD;

    let free: Vec<usize> = (0..length).filter(|&i| i != gold).collect();
    for i in index::sample(rng, free.len(), copper) {
        board[free[i]] = COPPER;
    }
    Ok(board)
}

impl fmt::Display for Ledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.board.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cell}")?;
        }
        f.write_str("]")
    }
}

impl Game for Ledge {
    type Move = LedgeMove;

    fn is_completed(&self) -> bool {
        self.gold_popped
    }

    fn state_key(&self) -> StateKey {
        StateKey::new(self.first_to_move, self.board.clone())
    }

    fn legal_moves(&self) -> Vec<LedgeMove> {
        if self.is_completed() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        if self.board[0] != EMPTY {
            moves.push(LedgeMove::Pop);
        }

        let coins: Vec<usize> = (0..self.board.len())
            .filter(|&i| self.board[i] != EMPTY)
            .collect();
        for (q, &from) in coins.iter().enumerate().rev() {
            let floor = if q == 0 { 0 } else { coins[q - 1] + 1 };
            // Board length is capped at 256 cells, so indices fit in u8
            for to in (floor..from).rev() {
                moves.push(LedgeMove::Slide {
                    from: from as u8,
                    to: to as u8,
                });
            }
        }
        moves
    }

    fn apply(&mut self, mv: &LedgeMove) -> Result<(), GameError> {
        if self.is_completed() {
            return Err(GameError::illegal_move(mv, "the gold coin is gone"));
        }
        match *mv {
            LedgeMove::Pop => {
                let coin = self.board[0];
                if coin == EMPTY {
                    return Err(GameError::illegal_move(mv, "the ledge is empty"));
                }
                self.board[0] = EMPTY;
                self.gold_popped = coin == GOLD;
            }
            LedgeMove::Slide { from, to } => {
                let (from, to) = (from as usize, to as usize);
                if from >= self.board.len() || self.board[from] == EMPTY {
                    return Err(GameError::illegal_move(mv, "no coin to slide"));
                }
                if to >= from || self.board[to..from].iter().any(|&c| c != EMPTY) {
                    return Err(GameError::illegal_move(
                        mv,
                        "coins slide left into an empty cell without passing another coin",
                    ));
                }
                self.board.swap(from, to);
            }
        }
        self.first_to_move = !self.first_to_move;
        Ok(())
    }

    fn first_player_to_move(&self) -> bool {
        self.first_to_move
    }
}

impl MoveCodec for Ledge {
    fn encode_move(mv: &LedgeMove, out: &mut Vec<u8>) {
        match *mv {
            LedgeMove::Pop => out.push(0),
            LedgeMove::Slide { from, to } => out.extend_from_slice(&[1, from, to]),
        }
    }

    fn decode_move(buf: &[u8]) -> Result<LedgeMove, DecodeError> {
        match buf {
            [0] => Ok(LedgeMove::Pop),
            [1, from, to] => Ok(LedgeMove::Slide {
                from: *from,
                to: *to,
            }),
            [tag, ..] if *tag > 1 => Err(DecodeError::CorruptedData(format!(
                "unknown move tag {tag}"
            ))),
            _ => Err(DecodeError::InvalidLength {
                expected: if buf.first() == Some(&1) { 3 } else { 1 },
                actual: buf.len(),
            }),
        }
    }
}
