//! UCT action selection.
//!
//! Values are always stored from the first player's point of view, so the
//! first player maximises `value + bonus` and the second player minimises
//! `value - bonus`.

use crate::node::{ActionStats, Node};

/// Exploration bonus `c * sqrt(ln(N) / (n + 1))`.
///
/// `ln_visits` is the natural log of the node's visit count, computed once
/// per selection.
#[inline]
pub fn exploration_bonus(stats: &ActionStats, ln_visits: f64, exploration: f64) -> f64 {
    exploration * (ln_visits / (stats.visits as f64 + 1.0)).sqrt()
}

/// Score of one action as seen by the player who owns the node.
#[inline]
pub fn uct_score(stats: &ActionStats, ln_visits: f64, exploration: f64, first_player: bool) -> f64 {
    let bonus = exploration_bonus(stats, ln_visits, exploration);
    if first_player {
        stats.value + bonus
    } else {
        stats.value - bonus
    }
}

/// Index of the action the node's owner should take.
///
/// Ties go to the earliest action in the node's order. Returns `None` for a
/// node without actions. With `exploration == 0.0` this is the greedy choice.
pub fn select_action<M>(node: &Node<M>, exploration: f64) -> Option<usize> {
    let ln_visits = (node.visit_count.max(1) as f64).ln();
    let first = node.first_player_owns;

    let mut best: Option<(usize, f64)> = None;
    for (index, (_, stats)) in node.actions.iter().enumerate() {
        let score = uct_score(stats, ln_visits, exploration, first);
        let better = match best {
            None => true,
            Some((_, best_score)) if first => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
