//! Statistics table with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! A hash index maps each state identity to its node, so transpositions
//! share statistics.

use std::collections::HashMap;

use engine_core::{Game, StateKey};

use crate::node::{Node, NodeId};

/// State identity to node table, owned by one search instance.
#[derive(Debug, Clone)]
pub struct StatsTable<M> {
    /// Arena storing all nodes
    nodes: Vec<Node<M>>,

    index: HashMap<StateKey, NodeId>,
}

impl<M> Default for StatsTable<M> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<M: Clone> StatsTable<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the node for the game's current state, creating it if absent.
    ///
    /// Returns the node id and whether it was created by this call. A new
    /// node takes its action list from `game.legal_moves()`; completed states
    /// are stored with no actions.
    pub fn lookup_or_create<G>(&mut self, game: &G) -> (NodeId, bool)
    where
        G: Game<Move = M>,
    {
        let key = game.state_key();
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }

        let node = Node::new(key.first_player_to_move, game.legal_moves());
        let id = self.allocate(node);
        self.index.insert(key, id);
        (id, true)
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: Node<M>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

impl<M> StatsTable<M> {
    /// Node id for a state, if it has been seen.
    pub fn lookup(&self, key: &StateKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<M> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<M> {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn nodes(&self) -> &[Node<M>] {
        &self.nodes
    }

    /// Drop every node. Ids handed out before are invalid afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Get statistics about the table for debugging.
    pub fn stats(&self) -> TableStats {
        TableStats {
            nodes: self.nodes.len(),
            total_visits: self.nodes.iter().map(|n| n.visit_count as u64).sum(),
            max_branching: self.nodes.iter().map(Node::branching).max().unwrap_or(0),
        }
    }
}

/// Statistics about a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub nodes: usize,
    pub total_visits: u64,
    pub max_branching: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_nim::Nim;

    fn nim(stones: u32, first: bool) -> Nim {
        Nim::new(stones, 3, 1, first).unwrap()
    }

    #[test]
    fn test_new_table() {
        let table: StatsTable<u32> = StatsTable::new();
        assert!(table.is_empty());
        assert_eq!(table.stats(), TableStats {
            nodes: 0,
            total_visits: 0,
            max_branching: 0,
        });
    }

    #[test]
    fn test_lookup_or_create() {
        let mut table = StatsTable::new();
        let game = nim(7, true);

        let (id, created) = table.lookup_or_create(&game);
        assert!(created);
        assert_eq!(id, NodeId(0));

        let node = table.get(id);
        assert_eq!(node.visit_count, 1);
        assert!(node.first_player_owns);
        let moves: Vec<u32> = node.actions.iter().map(|(m, _)| *m).collect();
        assert_eq!(moves, vec![1, 2, 3]);

        let (again, created) = table.lookup_or_create(&game);
        assert!(!created);
        assert_eq!(again, id);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_turn_is_part_of_identity() {
        let mut table = StatsTable::new();
        let (a, _) = table.lookup_or_create(&nim(5, true));
        let (b, created) = table.lookup_or_create(&nim(5, false));

        assert!(created);
        assert_ne!(a, b);
        assert!(!table.get(b).first_player_owns);
    }

    #[test]
    fn test_completed_state_has_no_actions() {
        let mut table = StatsTable::new();
        let mut game = nim(2, true);
        game.apply(&2).unwrap();

        let (id, created) = table.lookup_or_create(&game);
        assert!(created);
        assert_eq!(table.get(id).branching(), 0);
    }

    #[test]
    fn test_lookup() {
        let mut table = StatsTable::new();
        let game = nim(4, true);
        assert!(table.lookup(&game.state_key()).is_none());

        let (id, _) = table.lookup_or_create(&game);
        assert_eq!(table.lookup(&game.state_key()), Some(id));
    }

    #[test]
    fn test_clear_resets_exactly() {
        let mut table = StatsTable::new();
        let game = nim(6, true);
        let (id, _) = table.lookup_or_create(&game);
        {
            let node = table.get_mut(id);
            node.pending = Some(1);
            node.record(1.0);
        }
        table.lookup_or_create(&nim(3, false));
        assert_eq!(table.len(), 2);

        table.clear();
        assert!(table.is_empty());
        assert!(table.lookup(&game.state_key()).is_none());

        let (id, created) = table.lookup_or_create(&game);
        assert!(created);
        let node = table.get(id);
        assert_eq!(node.visit_count, 1);
        assert!(node.actions.iter().all(|(_, s)| s.visits == 0 && s.value == 0.0));
    }

    #[test]
    fn test_stats() {
        let mut table = StatsTable::new();
        let (id, _) = table.lookup_or_create(&nim(7, true));
        table.lookup_or_create(&nim(1, false));
        table.get_mut(id).pending = Some(0);
        table.get_mut(id).record(0.0);

        let stats = table.stats();
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.total_visits, 3);
        assert_eq!(stats.max_branching, 3);
    }
}
