//! Monte Carlo Tree Search for choosing cards during the play.
//!
//! ## Overview
//!
//! - **Determinized**: each search redraws every card hidden from the
//!   searching player, so it never reads an opponent's real hand
//! - **Rank-level opponents**: opponent nodes branch once per playable rank
//!   of the unseen cards
//! - **Point differential**: rollouts score the searching player's gain
//!   minus everyone else's, not a win/loss
//! - **Configurable policies**: selection (UCT) and simulation (random)
//!
//! ## Usage
//!
//! ```rust
//! use cribbage_engine::core::PlayerId;
//! use cribbage_engine::game::CribbageGameBuilder;
//! use cribbage_engine::mcts::{MCTSConfig, MCTSSearch};
//!
//! let game = CribbageGameBuilder::new(2)
//!     .dealer(PlayerId::new(1))
//!     .hand(PlayerId::new(0), "8S 8H 7S 6S".parse().unwrap())
//!     .hand(PlayerId::new(1), "KD 7D 4C 5S".parse().unwrap())
//!     .crib("AC AD AH AS".parse().unwrap())
//!     .starter("2C".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(200));
//! let card = search.search(&game, PlayerId::new(0)).unwrap();
//! assert!(game.hand(PlayerId::new(0)).unwrap().contains(card));
//!
//! for (card, rollouts) in search.card_visits() {
//!     println!("{card}: {rollouts}");
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{FinalSelection, MCTSConfig};
pub use node::{MCTSNode, NodeId};
pub use policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCT};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
