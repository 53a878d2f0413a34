//! Batch runner: plays games where one shared search drives both sides.

use anyhow::{Context, Result};
use engine_config::TableReset;
use engine_core::{create_game, ErasedGame, Game};
use indicatif::{ProgressBar, ProgressStyle};
use mcts::Mcts;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::stats::{BatchStats, BatchSummary};

/// Outcome of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub first_player_started: bool,
    pub first_player_won: bool,
    pub moves: u32,
}

pub struct Arena {
    config: Config,
    mcts: Mcts<Box<dyn ErasedGame>>,
    rng: ChaCha20Rng,
    stats: BatchStats,
}

impl Arena {
    /// Build a runner. Games must already be registered.
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let mcts = Mcts::new(config.mcts_config());
        let stats = BatchStats::new(&config.game_type, config.seed);

        Self {
            config,
            mcts,
            rng,
            stats,
        }
    }

    /// Play the whole batch and return its summary.
    pub fn run(&mut self) -> Result<BatchSummary> {
        info!(
            game = %self.config.game_type,
            games = self.config.games,
            simulations = self.config.simulations,
            exploration = self.config.exploration,
            table_reset = %self.config.table_reset,
            seed = ?self.config.seed,
            "Starting batch"
        );

        // The bar would be torn up by per-move logging
        let progress = if !self.config.verbose && std::io::IsTerminal::is_terminal(&std::io::stderr())
        {
            let pb = ProgressBar::new(self.config.games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for index in 0..self.config.games {
            let record = self.play_game(index)?;
            self.stats
                .record_game(record.first_player_started, record.first_player_won, record.moves);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        let table = self.mcts().table().stats();
        debug!(
            nodes = table.nodes,
            total_visits = table.total_visits,
            max_branching = table.max_branching,
            "Final table"
        );

        Ok(self.stats.snapshot())
    }

    /// Play one game to completion.
    pub fn play_game(&mut self, index: u32) -> Result<GameRecord> {
        // Built per game so random starts and layouts are drawn again
        let mut game = create_game(&self.config.game_type, &self.config.game_params, &mut self.rng)
            .with_context(|| format!("failed to create game '{}'", self.config.game_type))?;

        if self.config.table_reset == TableReset::PerGame {
            self.mcts.clear();
        }

        let first_player_started = game.first_player_to_move();
        if self.config.verbose {
            info!(
                game = index,
                starting_player = player_number(first_player_started),
                position = %game,
                "Starting game"
            );
        }

        let mut moves = 0u32;
        while !game.is_completed() {
            if self.config.table_reset == TableReset::PerMove {
                self.mcts.clear();
            }

            let result = self
                .mcts
                .search(&game, self.config.simulations, &mut self.rng)
                .with_context(|| format!("search failed in game {index} after {moves} moves"))?;
            self.stats.record_search(&result.stats);

            let player = player_number(game.first_player_to_move());
            game.apply(&result.action)
                .with_context(|| format!("search chose an illegal move: {}", result.action))?;
            moves += 1;

            if self.config.verbose {
                info!(
                    game = index,
                    player,
                    action = %result.action,
                    value = result.value,
                    position = %game,
                    "Move"
                );
            }
        }

        // Whoever made the last move won, so the player left to move lost
        let first_player_won = !game.first_player_to_move();
        if self.config.verbose {
            info!(
                game = index,
                winner = player_number(first_player_won),
                moves,
                "Game over"
            );
        }

        Ok(GameRecord {
            first_player_started,
            first_player_won,
            moves,
        })
    }

    pub fn mcts(&self) -> &Mcts<Box<dyn ErasedGame>> {
        &self.mcts
    }
}

fn player_number(first_player: bool) -> u8 {
    if first_player {
        1
    } else {
        2
    }
}
