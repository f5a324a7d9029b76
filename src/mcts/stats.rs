//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations performed.
    pub iterations: u32,

    /// Nodes whose children were generated.
    pub nodes_expanded: u32,

    /// Rollouts played to the end of the round.
    pub simulations: u32,

    /// Deepest node reached.
    pub max_depth: u16,

    /// Wall-clock time spent searching (microseconds).
    pub time_us: u64,

    /// Expansion stopped because the node cap was reached.
    pub node_cap_reached: bool,

    /// The search ended on the time limit rather than the iteration count.
    pub timed_out: bool,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of iterations that grew the tree.
    #[must_use]
    pub fn expansion_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            f64::from(self.nodes_expanded) / f64::from(self.iterations)
        }
    }
}
