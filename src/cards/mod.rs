//! Card model: the `Card` value type and the `Hand` container.
//!
//! ## Key Types
//!
//! - `Card`: suit × rank, `Copy`, totally ordered (rank then suit)
//! - `Hand`: duplicate-free ordered collection used for every pile

pub mod card;
pub mod hand;

pub use card::{Card, Rank, Suit};
pub use hand::Hand;
