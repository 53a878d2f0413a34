//! Rollout policies for the simulation phase.
//!
//! A rollout plays a game from the end of the tree traversal to completion
//! without touching the statistics table. Plain UCT uses uniformly random
//! moves; [`RolloutPolicy`] is the seam for anything smarter.

use engine_core::Game;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Chooses moves during rollouts.
pub trait RolloutPolicy<G: Game>: Send {
    /// Pick the index of the move to play. `moves` is never empty and the
    /// returned index must be within it.
    fn choose(&self, game: &G, moves: &[G::Move], rng: &mut ChaCha20Rng) -> usize;
}

/// Uniformly random legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl<G: Game> RolloutPolicy<G> for UniformRollout {
    fn choose(&self, _game: &G, moves: &[G::Move], rng: &mut ChaCha20Rng) -> usize {
        rng.gen_range(0..moves.len())
    }
}

/// Outcome of a completed game for the first player: 1.0 if the first player
/// made the final move, else 0.0.
#[inline]
pub fn outcome<G: Game>(game: &G) -> f64 {
    if game.first_player_to_move() {
        0.0
    } else {
        1.0
    }
}

/// Play `game` to completion with `policy`. Returns the outcome and the
/// number of moves played.
pub fn rollout<G, P>(
    game: &mut G,
    policy: &P,
    rng: &mut ChaCha20Rng,
) -> Result<(f64, u32), SearchError>
where
    G: Game,
    P: RolloutPolicy<G> + ?Sized,
{
    let mut plies = 0;
    while !game.is_completed() {
        let moves = game.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoActions);
        }
        let index = policy.choose(game, &moves, rng);
        game.apply(&moves[index])?;
        plies += 1;
    }
    Ok((outcome(game), plies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_nim::Nim;
    use rand::SeedableRng;

    /// Always plays the last listed move
    struct LastMove;

    impl<G: Game> RolloutPolicy<G> for LastMove {
        fn choose(&self, _game: &G, moves: &[G::Move], _rng: &mut ChaCha20Rng) -> usize {
            moves.len() - 1
        }
    }

    #[test]
    fn test_one_move_left_credits_last_mover() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let mut game = Nim::new(1, 3, 1, true).unwrap();
        assert_eq!(rollout(&mut game, &UniformRollout, &mut rng).unwrap(), (1.0, 1));

        let mut game = Nim::new(1, 3, 1, false).unwrap();
        assert_eq!(rollout(&mut game, &UniformRollout, &mut rng).unwrap(), (0.0, 1));
    }

    #[test]
    fn test_completed_game_is_untouched() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut game = Nim::new(3, 3, 1, true).unwrap();
        game.apply(&3).unwrap();

        let (value, plies) = rollout(&mut game, &UniformRollout, &mut rng).unwrap();
        assert_eq!(plies, 0);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_uniform_rollout_reaches_completion() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut game = Nim::new(20, 3, 1, true).unwrap();
            let (value, plies) = rollout(&mut game, &UniformRollout, &mut rng).unwrap();
            assert!(game.is_completed());
            assert!((7..=20).contains(&plies));
            // Odd number of plies means the first player moved last
            assert_eq!(value, if plies % 2 == 1 { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn test_custom_policy() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut game = Nim::new(9, 3, 1, true).unwrap();

        // Taking three every time: first, second, first
        let (value, plies) = rollout(&mut game, &LastMove, &mut rng).unwrap();
        assert_eq!(plies, 3);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_uniform_rollout_is_seeded() {
        let play = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut game = Nim::new(30, 4, 1, true).unwrap();
            let mut taken = Vec::new();
            while !game.is_completed() {
                let moves = game.legal_moves();
                let mv = moves[UniformRollout.choose(&game, &moves, &mut rng)];
                taken.push(mv);
                game.apply(&mv).unwrap();
            }
            taken
        };
        assert_eq!(play(11), play(11));
    }
}
