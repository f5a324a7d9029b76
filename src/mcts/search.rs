//! Core MCTS search algorithm.
//!
//! The searching player sees only its own hand. Each search first redraws
//! everything hidden from it, then grows a tree in which the searching
//! player's nodes branch on its playable cards and opponents' nodes branch on
//! one unseen card per playable rank. Rollouts play the round out at random
//! and score the searching player's gain minus everyone else's.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cards::Card;
use crate::core::{CribbageError, GameRng, PlayerId, Result};
use crate::game::CribbageGame;

use super::config::{FinalSelection, MCTSConfig};
use super::node::NodeId;
use super::policy::{
    argmax_random_tie, settle_count, RandomSimulation, SelectionPolicy, SimulationPolicy, UCT,
};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Owns the configuration, policies and random stream, and keeps the tree of
/// the most recent search for inspection.
pub struct MCTSSearch {
    config: MCTSConfig,

    /// Tree from the last completed search.
    tree: Option<MCTSTree>,

    /// Drives determinization, tie-breaks and rollouts.
    rng: GameRng,

    selection: Box<dyn SelectionPolicy>,

    simulation: Box<dyn SimulationPolicy>,

    stats: SearchStats,
}

impl MCTSSearch {
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            tree: None,
            rng,
            selection: Box::new(UCT),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    #[must_use]
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    #[must_use]
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Choose the card `player` should play in `game`.
    ///
    /// `game` is never modified; the search runs on a redrawn copy.
    ///
    /// # Errors
    ///
    /// `GameOver`, `StarterNotDrawn` or `NotYourTurn` when `player` cannot
    /// act, and `NoPlayableCard` when none of its cards fit under 31.
    pub fn search(&mut self, game: &CribbageGame, player: PlayerId) -> Result<Card> {
        let start = Instant::now();
        self.stats.reset();

        if game.game_over() {
            return Err(CribbageError::GameOver);
        }
        if game.starter().is_none() {
            return Err(CribbageError::StarterNotDrawn);
        }
        let expected = game.next_to_play().ok_or(CribbageError::DealerNotSet)?;
        if expected != player {
            return Err(CribbageError::NotYourTurn { player, expected });
        }
        let playable = game.playable_cards(player)?;
        match playable.as_slice() {
            [] => return Err(CribbageError::NoPlayableCard(player)),
            [only] => return Ok(*only),
            _ => {}
        }

        let mut root = game.clone();
        root.set_rng(self.rng.fork());
        root.redeal_hidden(player);
        let baseline = root.scores();

        let mut tree = MCTSTree::with_capacity(root, self.config.max_nodes.min(4096));
        let root_id = tree.root();
        self.expand(&mut tree, root_id, player)?;

        let limit = self.config.time_limit_ms.map(Duration::from_millis);
        for _ in 0..self.config.iterations {
            if limit.is_some_and(|limit| start.elapsed() >= limit) {
                self.stats.timed_out = true;
                break;
            }
            self.iteration(&mut tree, player, &baseline)?;
            self.stats.iterations += 1;
        }
        self.stats.time_us = start.elapsed().as_micros() as u64;

        let card = self.best_card(&tree, player)?;
        debug!(
            player = %player,
            %card,
            iterations = self.stats.iterations,
            nodes = tree.len(),
            "search finished"
        );
        self.tree = Some(tree);
        Ok(card)
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut MCTSTree, player: PlayerId, baseline: &[u32]) -> Result<()> {
        // === SELECTION ===
        let mut current = tree.root();
        while tree.get(current).has_children() {
            match self.selection.select(tree, current, &self.config, &mut self.rng) {
                Some(child) => current = child,
                None => break,
            }
        }

        // === EXPANSION ===
        let leaf = tree.get(current);
        if !leaf.expanded && !leaf.is_terminal() {
            if tree.len() < self.config.max_nodes {
                self.expand(tree, current, player)?;
                if let Some(child) = self.selection.select(tree, current, &self.config, &mut self.rng)
                {
                    current = child;
                }
            } else {
                self.stats.node_cap_reached = true;
            }
        }
        self.stats.max_depth = self.stats.max_depth.max(tree.get(current).depth);

        // === SIMULATION ===
        let mut game = tree.get(current).state.clone();
        self.simulation.simulate(&mut game, &mut self.rng)?;
        self.stats.simulations += 1;
        let diff = point_differential(&game, player, baseline);

        // === BACKPROPAGATION ===
        backpropagate(tree, current, player, diff);
        Ok(())
    }

    /// Generate one child per candidate card of whoever plays next.
    fn expand(&mut self, tree: &mut MCTSTree, id: NodeId, player: PlayerId) -> Result<()> {
        let state = &tree.get(id).state;
        let Some(mover) = state.next_to_play() else {
            tree.get_mut(id).expanded = true;
            return Ok(());
        };

        let mut children = Vec::new();
        for card in candidate_cards(state, mover, player)? {
            let mut next = state.clone();
            if mover != player {
                next.swap_into_hand(mover, card)?;
            }
            next.play_card(mover, card)?;
            settle_count(&mut next);
            children.push((next, card));
        }

        let count = children.len();
        for (next, card) in children {
            tree.add_child(id, next, mover, card);
        }
        tree.get_mut(id).expanded = true;
        self.stats.nodes_expanded += 1;
        trace!(node = %id, mover = %mover, children = count, "node expanded");
        Ok(())
    }

    /// Select the card to play from the root.
    fn best_card(&mut self, tree: &MCTSTree, player: PlayerId) -> Result<Card> {
        let root = tree.root_node();
        let rule = self.config.final_selection;
        let best = argmax_random_tie(
            root.children.iter().map(|&id| {
                let child = tree.get(id);
                let score = match rule {
                    FinalSelection::MostVisited => f64::from(child.rollouts),
                    FinalSelection::HighestValue => child.mean_points(),
                };
                (id, score)
            }),
            &mut self.rng,
        );
        best.and_then(|id| tree.get(id).card)
            .ok_or(CribbageError::NoPlayableCard(player))
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree from the last search that ran the full loop.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree> {
        self.tree.as_ref()
    }

    /// Rollouts per root card from the last search.
    pub fn card_visits(&self) -> Vec<(Card, u32)> {
        self.tree
            .iter()
            .flat_map(|tree| tree.root_children())
            .filter_map(|child| child.card.map(|card| (card, child.rollouts)))
            .collect()
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Cards `mover` might play from `state`, as far as `viewer` can tell.
///
/// The viewer knows its own hand. For anyone else it only knows which cards
/// are unseen; since suits never matter during the play, one card of each
/// playable rank is enough.
fn candidate_cards(state: &CribbageGame, mover: PlayerId, viewer: PlayerId) -> Result<Vec<Card>> {
    if mover == viewer {
        return state.playable_cards(mover);
    }
    let mut ranks_seen = 0u16;
    Ok(state
        .unseen_cards(viewer)?
        .iter()
        .filter(|&card| state.can_play_card(card))
        .filter(|card| {
            let bit = 1u16 << card.rank().index();
            let fresh = ranks_seen & bit == 0;
            ranks_seen |= bit;
            fresh
        })
        .collect())
}

/// The searching player's gain minus every opponent's gain since `baseline`.
fn point_differential(game: &CribbageGame, player: PlayerId, baseline: &[u32]) -> f64 {
    game.scores()
        .iter()
        .zip(baseline)
        .enumerate()
        .map(|(i, (&now, &before))| {
            let gain = f64::from(now) - f64::from(before);
            if i == player.index() {
                gain
            } else {
                -gain
            }
        })
        .sum()
}

/// Credit `diff` to every node from `leaf` up to the root, from each
/// mover's point of view.
fn backpropagate(tree: &mut MCTSTree, leaf: NodeId, player: PlayerId, diff: f64) {
    let mut id = leaf;
    while !id.is_none() {
        let node = tree.get_mut(id);
        node.rollouts += 1;
        match node.mover {
            Some(mover) if mover == player => node.points += diff,
            Some(_) => node.points -= diff,
            None => {}
        }
        id = node.parent;
    }
}
