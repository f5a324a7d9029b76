//! MCTS node structure.
//!
//! Uses arena-based allocation with index references (NodeId). Each node
//! owns the simulated game reached by playing its card, so descending the
//! tree never replays moves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::PlayerId;
use crate::game::CribbageGame;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct MCTSNode {
    /// Game after `card` was played (and the count settled).
    pub state: CribbageGame,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Who played `card` to reach this node. None for the root.
    pub mover: Option<PlayerId>,

    /// The card played to reach this node. None for the root.
    pub card: Option<Card>,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Rollouts passing through this node.
    pub rollouts: u32,

    /// Sum of rollout point differentials, seen from `mover`.
    pub points: f64,

    /// Child nodes, one per candidate card.
    /// Own moves branch at most four ways; opponent nodes branch once per
    /// playable rank and may spill to the heap.
    pub children: SmallVec<[NodeId; 8]>,

    /// Whether children have been generated.
    pub expanded: bool,
}

impl MCTSNode {
    pub fn new(
        state: CribbageGame,
        parent: NodeId,
        mover: PlayerId,
        card: Card,
        depth: u16,
    ) -> Self {
        Self {
            state,
            parent,
            mover: Some(mover),
            card: Some(card),
            depth,
            rollouts: 0,
            points: 0.0,
            children: SmallVec::new(),
            expanded: false,
        }
    }

    /// Create a root node.
    pub fn root(state: CribbageGame) -> Self {
        Self {
            state,
            parent: NodeId::NONE,
            mover: None,
            card: None,
            depth: 0,
            rollouts: 0,
            points: 0.0,
            children: SmallVec::new(),
            expanded: false,
        }
    }

    /// Average differential per rollout (0 before the first rollout).
    #[must_use]
    pub fn mean_points(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.points / f64::from(self.rollouts)
        }
    }

    /// No more cards to play from here.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.round_over()
    }

    /// Check if selection can descend past this node.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.expanded && !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn game() -> CribbageGame {
        CribbageGame::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = MCTSNode::root(game());

        assert!(node.parent.is_none());
        assert_eq!(node.depth, 0);
        assert_eq!(node.mover, None);
        assert_eq!(node.card, None);
        assert_eq!(node.rollouts, 0);
        assert!(!node.has_children());
    }

    #[test]
    fn test_mean_points() {
        let mut node = MCTSNode::new(
            game(),
            NodeId::new(0),
            PlayerId::new(1),
            "5H".parse().unwrap(),
            1,
        );
        assert_eq!(node.mean_points(), 0.0);

        node.rollouts = 4;
        node.points = -6.0;
        assert_eq!(node.mean_points(), -1.5);
    }

    #[test]
    fn test_has_children_requires_expansion() {
        let mut node = MCTSNode::root(game());
        node.children.push(NodeId::new(1));
        assert!(!node.has_children());

        node.expanded = true;
        assert!(node.has_children());
    }
}
