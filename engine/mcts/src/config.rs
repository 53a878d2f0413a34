//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for UCT search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant `c` in the UCT bonus.
    /// 0.0 turns selection greedy; sqrt(2) is the textbook choice.
    pub exploration: f64,

    /// Optional wall-clock budget per search.
    /// The search stops after the first simulation that ends past the deadline,
    /// so at least one simulation always runs. Searches are only reproducible
    /// from a seed when this is `None`.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Config that only exploits current statistics.
    pub fn greedy() -> Self {
        Self::default().with_exploration(0.0)
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the per-search time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration - 1.0).abs() < 1e-12);
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_exploration(1.4)
            .with_time_limit(Duration::from_millis(20));

        assert!((config.exploration - 1.4).abs() < 1e-12);
        assert_eq!(config.time_limit, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_greedy_config() {
        assert_eq!(MctsConfig::greedy().exploration, 0.0);
    }
}
