//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to explore (UCT)
//! - `SimulationPolicy`: How to play a round out from a leaf (random)

use crate::core::{GameRng, Result};
use crate::game::CribbageGame;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Pick a child of `node`, or `None` if it has none.
    fn select(
        &self,
        tree: &MCTSTree,
        node: NodeId,
        config: &MCTSConfig,
        rng: &mut GameRng,
    ) -> Option<NodeId>;
}

/// UCT (UCB1 applied to trees) selection policy.
///
/// Formula: points/rollouts + c * sqrt(ln(N) / rollouts). Unvisited
/// children score `f64::MAX` unless c is zero. Ties are broken at random.
#[derive(Clone, Debug, Default)]
pub struct UCT;

impl UCT {
    /// UCT value of `child` under a parent with `parent_rollouts` visits.
    #[must_use]
    pub fn value(tree: &MCTSTree, child: NodeId, parent_rollouts: u32, c: f64) -> f64 {
        let node = tree.get(child);
        if node.rollouts == 0 {
            return if c == 0.0 { 0.0 } else { f64::MAX };
        }
        let ln_parent = f64::from(parent_rollouts.max(1)).ln();
        node.mean_points() + c * (ln_parent / f64::from(node.rollouts)).sqrt()
    }
}

impl SelectionPolicy for UCT {
    fn select(
        &self,
        tree: &MCTSTree,
        node: NodeId,
        config: &MCTSConfig,
        rng: &mut GameRng,
    ) -> Option<NodeId> {
        let parent = tree.get(node);
        let c = config.exploration_constant;
        argmax_random_tie(
            parent
                .children
                .iter()
                .map(|&child| (child, Self::value(tree, child, parent.rollouts, c))),
            rng,
        )
    }
}

/// The item with the largest score, choosing uniformly among equal scores.
pub(crate) fn argmax_random_tie<T: Copy>(
    scored: impl Iterator<Item = (T, f64)>,
    rng: &mut GameRng,
) -> Option<T> {
    let mut best = f64::NEG_INFINITY;
    let mut ties: Vec<T> = Vec::new();
    for (item, score) in scored {
        if score > best {
            best = score;
            ties.clear();
            ties.push(item);
        } else if score == best {
            ties.push(item);
        }
    }
    rng.choose(&ties).copied()
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy: Send + Sync {
    /// Play `game` forward until the round (or game) is over.
    fn simulate(&self, game: &mut CribbageGame, rng: &mut GameRng) -> Result<()>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal cards for whoever is next.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl SimulationPolicy for RandomSimulation {
    fn simulate(&self, game: &mut CribbageGame, rng: &mut GameRng) -> Result<()> {
        loop {
            settle_count(game);
            if game.round_over() {
                return Ok(());
            }
            let Some(pid) = game.next_to_play() else {
                return Ok(());
            };
            let cards = game.playable_cards(pid)?;
            let Some(&card) = rng.choose(&cards) else {
                return Ok(());
            };
            game.play_card(pid, card)?;
        }
    }
}

/// Start a new count when nobody can play but cards remain.
pub(crate) fn settle_count(game: &mut CribbageGame) {
    if !game.round_over() && !game.move_possible() {
        game.reset_count();
    }
}
