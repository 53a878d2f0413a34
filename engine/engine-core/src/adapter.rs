//! Adapter layer converting typed games to erased interface
//!
//! This module provides the `GameAdapter` struct that automatically converts
//! any typed `Game` implementation to the `ErasedGame` interface, handling
//! move encoding/decoding.

use std::fmt;

use crate::erased::{ErasedGame, ErasedMove};
use crate::typed::{Game, GameError, MoveCodec, StateKey};

/// Adapter that converts typed games to erased interface
///
/// # Example
///
/// ```rust
/// # use engine_core::adapter::GameAdapter;
/// # use engine_core::erased::ErasedGame;
/// # use engine_core::typed::{DecodeError, Game, GameError, MoveCodec, StateKey};
/// # use std::fmt;
/// #
/// # #[derive(Debug, Clone)]
/// # struct Coin(bool);
/// # impl fmt::Display for Coin {
/// #     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "coin") }
/// # }
/// # impl Game for Coin {
/// #     type Move = u8;
/// #     fn is_completed(&self) -> bool { !self.0 }
/// #     fn state_key(&self) -> StateKey { StateKey::new(self.0, vec![]) }
/// #     fn legal_moves(&self) -> Vec<u8> { if self.0 { vec![0] } else { vec![] } }
/// #     fn apply(&mut self, _mv: &u8) -> Result<(), GameError> { self.0 = false; Ok(()) }
/// #     fn first_player_to_move(&self) -> bool { self.0 }
/// # }
/// # impl MoveCodec for Coin {
/// #     fn encode_move(mv: &u8, out: &mut Vec<u8>) { out.push(*mv) }
/// #     fn decode_move(buf: &[u8]) -> Result<u8, DecodeError> {
/// #         buf.first().copied().ok_or(DecodeError::InvalidLength { expected: 1, actual: 0 })
/// #     }
/// # }
///
/// let erased: Box<dyn ErasedGame> = Box::new(GameAdapter::new("coin", Coin(true)));
/// assert_eq!(erased.env_id(), "coin");
/// assert_eq!(erased.legal_moves().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameAdapter<T: Game + MoveCodec> {
    env_id: &'static str,
    game: T,
}

impl<T: Game + MoveCodec> GameAdapter<T> {
    /// Create a new adapter wrapping the given game
    pub fn new(env_id: &'static str, game: T) -> Self {
        Self { env_id, game }
    }

    /// Get a reference to the underlying game
    pub fn game(&self) -> &T {
        &self.game
    }

    /// Consume the adapter and return the underlying game
    pub fn into_inner(self) -> T {
        self.game
    }

    fn erase(mv: &T::Move) -> ErasedMove {
        let mut bytes = Vec::with_capacity(4);
        T::encode_move(mv, &mut bytes);
        ErasedMove::new(bytes, mv.to_string())
    }
}

impl<T: Game + MoveCodec> fmt::Display for GameAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.game, f)
    }
}

impl<T: Game + MoveCodec> ErasedGame for GameAdapter<T> {
    fn env_id(&self) -> &str {
        self.env_id
    }

    fn is_completed(&self) -> bool {
        self.game.is_completed()
    }

    fn state_key(&self) -> StateKey {
        self.game.state_key()
    }

    fn legal_moves(&self) -> Vec<ErasedMove> {
        self.game.legal_moves().iter().map(Self::erase).collect()
    }

    fn apply(&mut self, mv: &ErasedMove) -> Result<(), GameError> {
        let typed = T::decode_move(mv.bytes())?;
        self.game.apply(&typed)
    }

    fn first_player_to_move(&self) -> bool {
        self.game.first_player_to_move()
    }

    fn box_clone(&self) -> Box<dyn ErasedGame> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Countdown;

    #[test]
    fn test_adapter_passthrough() {
        let adapter = GameAdapter::new("countdown", Countdown::new(5));

        assert_eq!(adapter.env_id(), "countdown");
        assert!(!ErasedGame::is_completed(&adapter));
        assert!(ErasedGame::first_player_to_move(&adapter));
        assert_eq!(
            ErasedGame::state_key(&adapter),
            adapter.game().state_key()
        );
        assert_eq!(adapter.to_string(), adapter.game().to_string());
    }

    #[test]
    fn test_legal_moves_keep_order_and_labels() {
        let adapter = GameAdapter::new("countdown", Countdown::new(5));
        let moves = ErasedGame::legal_moves(&adapter);

        let labels: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["1", "2"]);
        assert_eq!(moves[1].bytes(), &[2]);
    }

    #[test]
    fn test_apply_round_trips_through_bytes() {
        let mut adapter = GameAdapter::new("countdown", Countdown::new(5));
        let mv = ErasedGame::legal_moves(&adapter).remove(1);

        ErasedGame::apply(&mut adapter, &mv).unwrap();

        assert_eq!(adapter.game().state_key().bytes, vec![3]);
        assert!(!ErasedGame::first_player_to_move(&adapter));
    }

    #[test]
    fn test_illegal_move_propagates() {
        let mut adapter = GameAdapter::new("countdown", Countdown::new(1));
        let too_many = ErasedMove::new(vec![2], "2".to_string());

        let err = ErasedGame::apply(&mut adapter, &too_many).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { .. }));
    }

    #[test]
    fn test_into_inner() {
        let adapter = GameAdapter::new("countdown", Countdown::new(2));
        let game = adapter.into_inner();
        assert_eq!(game.legal_moves(), vec![1, 2]);
    }
}
