//! UCT search implementation.
//!
//! Each simulation runs on a private clone of the root game:
//! 1. Traversal: follow UCT choices through known states until reaching a
//!    state with no node yet, which is created and ends the traversal
//! 2. Rollout: play on with the rollout policy until the game completes
//! 3. Evaluation: 1.0 if the first player made the final move, else 0.0
//! 4. Backpropagation: fold the outcome into every traversed node's choice

use std::time::Instant;

use engine_core::{Game, GameError};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{rollout, RolloutPolicy, UniformRollout};
use crate::selection::select_action;
use crate::table::StatsTable;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Cannot search from a completed game")]
    GameCompleted,

    #[error("Search needs at least one simulation")]
    NoSimulations,

    #[error("No legal moves available in an unfinished game")]
    NoActions,

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Best action at the root with exploration disabled
    pub action: M,

    /// Running mean outcome of `action` for the first player
    pub value: f64,

    /// Visit count of the root node after the search
    pub root_visits: u32,

    pub stats: SearchStats,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Simulations performed
    pub simulations: u32,
    /// Nodes added to the table by this search
    pub nodes_created: usize,
    /// Longest traversal path
    pub max_depth: usize,
    /// Moves played during rollouts
    pub rollout_moves: u64,
    pub elapsed_us: u64,
}

/// UCT search with a persistent statistics table.
///
/// The table survives between searches until [`Mcts::clear`] is called, so
/// statistics gathered while choosing one move are reused for the next.
pub struct Mcts<G: Game, P: RolloutPolicy<G> = UniformRollout> {
    table: StatsTable<G::Move>,
    config: MctsConfig,
    policy: P,
}

impl<G: Game> Mcts<G> {
    /// Search with uniformly random rollouts.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_policy(config, UniformRollout)
    }
}

impl<G: Game, P: RolloutPolicy<G>> Mcts<G, P> {
    pub fn with_policy(config: MctsConfig, policy: P) -> Self {
        Self {
            table: StatsTable::new(),
            config,
            policy,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn table(&self) -> &StatsTable<G::Move> {
        &self.table
    }

    /// Forget every statistic gathered so far.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Run `simulations` simulations from `root` and return the best action.
    ///
    /// The root itself is never modified. With a configured time limit the
    /// search may stop early, but always after at least one simulation.
    ///
    /// # Errors
    ///
    /// `GameCompleted` for a finished root, `NoSimulations` for a zero budget,
    /// and any game error raised while applying moves.
    pub fn search(
        &mut self,
        root: &G,
        simulations: u32,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        if root.is_completed() {
            return Err(SearchError::GameCompleted);
        }
        if simulations == 0 {
            return Err(SearchError::NoSimulations);
        }

        let start = Instant::now();
        let deadline = self.config.time_limit.map(|limit| start + limit);
        let nodes_before = self.table.len();
        let mut stats = SearchStats::default();

        for _ in 0..simulations {
            self.simulate(root, rng, &mut stats)?;
            stats.simulations += 1;

            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(
                    simulations = stats.simulations,
                    budget = simulations,
                    "Search time limit reached"
                );
                break;
            }
        }

        // The first simulation always creates the root node if it was missing
        let (root_id, _) = self.table.lookup_or_create(root);
        let node = self.table.get(root_id);
        let index = select_action(node, 0.0).ok_or(SearchError::NoActions)?;
        let (action, action_stats) = &node.actions[index];

        stats.nodes_created = self.table.len() - nodes_before;
        stats.elapsed_us = start.elapsed().as_micros() as u64;

        debug!(
            action = %action,
            value = action_stats.value,
            visits = action_stats.visits,
            root_visits = node.visit_count,
            simulations = stats.simulations,
            nodes_created = stats.nodes_created,
            table_size = self.table.len(),
            elapsed_us = stats.elapsed_us,
            "Search complete"
        );

        Ok(SearchResult {
            action: action.clone(),
            value: action_stats.value,
            root_visits: node.visit_count,
            stats,
        })
    }

    /// Run a single simulation (traverse -> rollout -> evaluate -> backpropagate).
    fn simulate(
        &mut self,
        root: &G,
        rng: &mut ChaCha20Rng,
        stats: &mut SearchStats,
    ) -> Result<(), SearchError> {
        let mut game = root.clone();
        let path = self.traverse(&mut game)?;
        let (outcome, plies) = rollout(&mut game, &self.policy, rng)?;
        self.backpropagate(&path, outcome);

        stats.max_depth = stats.max_depth.max(path.len());
        stats.rollout_moves += plies as u64;

        trace!(
            path_len = path.len(),
            rollout_moves = plies,
            outcome = outcome,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Walk known states with UCT, recording each node's choice.
    ///
    /// The first state without a node gets one and ends the walk; it is not
    /// part of the returned path.
    fn traverse(&mut self, game: &mut G) -> Result<Vec<NodeId>, SearchError> {
        let mut path = Vec::new();

        while !game.is_completed() {
            let (id, created) = self.table.lookup_or_create(game);
            if created {
                break;
            }
            path.push(id);

            let node = self.table.get_mut(id);
            let index =
                select_action(node, self.config.exploration).ok_or(SearchError::NoActions)?;
            node.pending = Some(index);
            let mv = node.actions[index].0.clone();
            game.apply(&mv)?;
        }

        Ok(path)
    }

    /// Update every node on the path with the outcome, then clear the
    /// pending choices.
    fn backpropagate(&mut self, path: &[NodeId], outcome: f64) {
        for &id in path {
            self.table.get_mut(id).record(outcome);
        }
        for &id in path {
            self.table.get_mut(id).pending = None;
        }
    }
}
