//! Erased Game interface for runtime polymorphism
//!
//! Typed games have their own move types, so they cannot sit side by side in
//! the registry. This module provides an object-safe mirror of the game
//! contract whose moves are carried as bytes. Typed games are converted to it
//! by [`GameAdapter`](crate::adapter::GameAdapter), and `Box<dyn ErasedGame>`
//! implements [`Game`] again so the search runs on registry-built games
//! without knowing which game it is playing.

use std::fmt;

use crate::typed::{Game, GameError, StateKey};

/// A move in erased form: the typed move's byte encoding plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErasedMove {
    bytes: Vec<u8>,
    label: String,
}

impl ErasedMove {
    pub fn new(bytes: Vec<u8>, label: String) -> Self {
        Self { bytes, label }
    }

    /// Encoded move bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ErasedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Erased game trait that works only with bytes
///
/// # Example Usage
///
/// ```rust
/// # use engine_core::erased::*;
/// # use engine_core::GameError;
///
/// fn play_first_moves(game: &mut dyn ErasedGame) -> Result<u32, GameError> {
///     let mut plies = 0;
///     while !game.is_completed() {
///         let mv = game.legal_moves().remove(0);
///         game.apply(&mv)?;
///         plies += 1;
///     }
///     Ok(plies)
/// }
/// ```
pub trait ErasedGame: fmt::Debug + fmt::Display + Send + 'static {
    /// Registry tag of the underlying game (e.g. "nim")
    fn env_id(&self) -> &str;

    fn is_completed(&self) -> bool;

    fn state_key(&self) -> StateKey;

    fn legal_moves(&self) -> Vec<ErasedMove>;

    /// Decode and apply a move
    ///
    /// # Errors
    ///
    /// Returns `GameError::Decode` for malformed bytes and
    /// `GameError::IllegalMove` for moves the game rejects.
    fn apply(&mut self, mv: &ErasedMove) -> Result<(), GameError>;

    fn first_player_to_move(&self) -> bool;

    /// Deep copy behind a new box
    fn box_clone(&self) -> Box<dyn ErasedGame>;
}

impl Clone for Box<dyn ErasedGame> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl Game for Box<dyn ErasedGame> {
    type Move = ErasedMove;

    fn is_completed(&self) -> bool {
        self.as_ref().is_completed()
    }

    fn state_key(&self) -> StateKey {
        self.as_ref().state_key()
    }

    fn legal_moves(&self) -> Vec<ErasedMove> {
        self.as_ref().legal_moves()
    }

    fn apply(&mut self, mv: &ErasedMove) -> Result<(), GameError> {
        self.as_mut().apply(mv)
    }

    fn first_player_to_move(&self) -> bool {
        self.as_ref().first_player_to_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::GameAdapter;
    use crate::test_utils::Countdown;

    fn boxed(n: u8) -> Box<dyn ErasedGame> {
        Box::new(GameAdapter::new("countdown", Countdown::new(n)))
    }

    #[test]
    fn test_erased_move_display_uses_label() {
        let mv = ErasedMove::new(vec![2], "take 2".to_string());
        assert_eq!(mv.to_string(), "take 2");
        assert_eq!(mv.bytes(), &[2]);
    }

    #[test]
    fn test_boxed_game_implements_game() {
        fn drive<G: Game>(mut game: G) -> bool {
            while !game.is_completed() {
                let mv = game.legal_moves().remove(0);
                game.apply(&mv).unwrap();
            }
            // Player who took the last item
            !game.first_player_to_move()
        }

        // 3 items, one at a time: first, second, first
        assert!(drive(boxed(3)));
        assert!(!drive(boxed(2)));
    }

    #[test]
    fn test_boxed_clone_is_independent() {
        let game = boxed(4);
        let mut copy = game.clone();
        let mv = copy.legal_moves().remove(0);
        Game::apply(&mut copy, &mv).unwrap();

        assert_eq!(game.state_key().bytes, vec![4]);
        assert_eq!(copy.state_key().bytes, vec![3]);
        assert_eq!(copy.env_id(), "countdown");
    }

    #[test]
    fn test_corrupted_move_is_rejected() {
        let mut game = boxed(4);
        let bogus = ErasedMove::new(vec![], "nothing".to_string());
        let err = Game::apply(&mut game, &bogus).unwrap_err();
        assert!(matches!(err, GameError::Decode(_)));
    }
}
