//! Core engine types: players, RNG, errors, configuration.
//!
//! Everything here is independent of the rules of cribbage itself.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, CRIB_SIZE, DECK_SIZE, HAND_SIZE, MAX_COUNT, WINNING_SCORE};
pub use error::{CribbageError, ErrorKind, Result};
