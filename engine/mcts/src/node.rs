//! Statistics kept for one decision point.
//!
//! A node belongs to a state, not to a position in a tree: every path that
//! reaches the same state identity shares the node. The action list is fixed
//! when the node is created.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Visit count and running mean outcome of one action.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionStats {
    /// Times the action was taken during traversal
    pub visits: u32,
    /// Mean outcome for the first player, always within [0, 1]
    pub value: f64,
}

impl ActionStats {
    /// Fold one outcome into the running mean.
    #[inline]
    pub fn record(&mut self, outcome: f64) {
        self.visits += 1;
        self.value += (outcome - self.value) / self.visits as f64;
    }
}

/// A node in the statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<M> {
    /// Starts at 1: creating the node counts as its first visit.
    pub visit_count: u32,

    /// Whether the first player moves at this state
    pub first_player_owns: bool,

    /// Legal moves in the order the game reported them, with their statistics
    pub actions: Vec<(M, ActionStats)>,

    /// Action chosen by the simulation currently passing through this node
    pub pending: Option<usize>,
}

impl<M> Node<M> {
    pub fn new(first_player_owns: bool, moves: Vec<M>) -> Self {
        Self {
            visit_count: 1,
            first_player_owns,
            actions: moves
                .into_iter()
                .map(|mv| (mv, ActionStats::default()))
                .collect(),
            pending: None,
        }
    }

    /// Number of legal moves at this state.
    #[inline]
    pub fn branching(&self) -> usize {
        self.actions.len()
    }

    /// Apply one backpropagated outcome to the pending action.
    ///
    /// The pending choice is left in place so a state reached twice in one
    /// simulation gets both updates on its latest choice, keeping
    /// `visit_count == 1 + sum of action visits`. The search clears it once
    /// the whole path has been updated.
    pub fn record(&mut self, outcome: f64) {
        if let Some(index) = self.pending {
            self.actions[index].1.record(outcome);
            self.visit_count += 1;
        }
    }

    /// Total visits over all actions.
    pub fn action_visits(&self) -> u32 {
        self.actions.iter().map(|(_, s)| s.visits).sum()
    }
}
