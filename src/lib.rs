//! # cribbage-engine
//!
//! A cribbage rules engine for two or three players, with computer opponents.
//!
//! ## Design Principles
//!
//! 1. **Validated transitions**: every phase operation checks the whole move
//!    before touching state, so an `Err` leaves the game unchanged.
//!
//! 2. **Cards are never lost**: the draw pile, hands, crib, played piles and
//!    starter always partition the 52-card deck.
//!
//! 3. **Deterministic**: all randomness flows through a seedable, forkable
//!    `GameRng`; the same seed replays the same deals and the same searches.
//!
//! ## Architecture
//!
//! - **Pure scoring**: show and pegging scores are free functions over card
//!   slices and the play stack, reused by the AI.
//!
//! - **Cheap forks**: the play stack is an `im::Vector` and hands are small
//!   vectors, so the tree search can clone whole games per node.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration and errors
//! - `cards`: `Card`, `Suit`, `Rank` and the `Hand` container
//! - `scoring`: Show and pegging scores
//! - `game`: The `CribbageGame` state machine and the `Table` driver
//! - `ai`: `CribbageAI` strategies and expected-value discard selection
//! - `mcts`: Monte Carlo Tree Search for card play

pub mod ai;
pub mod cards;
pub mod core;
pub mod game;
pub mod mcts;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    CribbageError, ErrorKind, GameConfig, GameRng, PlayerId, PlayerMap, Result, WINNING_SCORE,
};

pub use crate::cards::{Card, Hand, Rank, Suit};

pub use crate::scoring::{score_hand, HandKind, HandScore, PegScore};

pub use crate::game::{CribbageGame, CribbageGameBuilder, GameSummary, Phase, Table};

pub use crate::ai::{CribbageAI, RandomPlayer, SmartPlayer};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};
