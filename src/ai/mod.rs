//! Computer opponents.
//!
//! Every strategy implements [`CribbageAI`]. A driver asks the strategy for a
//! move and then feeds it to the game exactly as it would a human's move, so
//! strategies never mutate the game themselves.
//!
//! - `discard`: expected-value search over which four cards to keep
//! - `RandomPlayer`: uniform random legal moves
//! - `SmartPlayer`: discard search for the deal, tree search for the play

pub mod discard;
pub mod random;
pub mod smart;

pub use discard::{expected_value, select_keep};
pub use random::RandomPlayer;
pub use smart::SmartPlayer;

use crate::cards::{Card, Hand};
use crate::core::{PlayerId, Result};
use crate::game::CribbageGame;

/// A cribbage strategy.
///
/// Implementations may keep private state (a random stream, a search tree)
/// between calls, hence `&mut self`.
pub trait CribbageAI {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// The four cards `pid` should keep; the rest go to the crib.
    ///
    /// If the hand is already down to four cards it is returned unchanged.
    fn select_keep(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Hand>;

    /// The card `pid` should play next. Only called on `pid`'s turn.
    fn select_play(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Card>;
}
