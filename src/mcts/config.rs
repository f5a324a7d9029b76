//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// How the move is picked from the root once the search budget is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalSelection {
    /// Child with the most rollouts.
    #[default]
    MostVisited,
    /// Child with the best mean point differential.
    HighestValue,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCT exploration constant (default: 1.0).
    /// Zero turns selection fully greedy.
    pub exploration_constant: f64,

    /// Selection/expansion/rollout/backpropagation passes per search.
    pub iterations: u32,

    /// Maximum nodes to allocate in the tree.
    /// Once reached, iterations keep rolling out from existing leaves.
    pub max_nodes: usize,

    /// Random seed for determinization and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Root move selection rule.
    pub final_selection: FinalSelection,

    /// Optional wall-clock cap in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            iterations: 10_000,
            max_nodes: 100_000,
            seed: 42,
            final_selection: FinalSelection::MostVisited,
            time_limit_ms: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_final_selection(mut self, rule: FinalSelection) -> Self {
        self.final_selection = rule;
        self
    }

    /// Stop early once this many milliseconds have elapsed.
    #[must_use]
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }
}
