//! Error types for game operations.
//!
//! Every fallible operation returns [`CribbageError`]. Errors are grouped into
//! two kinds (see [`ErrorKind`]): bad input from the caller, and an operation
//! attempted in the wrong phase of the game. No operation mutates state before
//! it has fully validated, so an `Err` always leaves the game unchanged.

use thiserror::Error;

use super::PlayerId;
use crate::cards::Card;

/// Broad classification of a [`CribbageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something malformed or out of range.
    InvalidArgument,
    /// The operation is not allowed in the current state of the game.
    IllegalState,
}

/// Errors raised by the engine and its AIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CribbageError {
    /// Only 2 and 3 player games exist.
    #[error("must have either 2 or 3 players, got {0}")]
    InvalidPlayerCount(usize),
    /// Seat index outside the table.
    #[error("invalid player id {player}; must be below {player_count}")]
    InvalidPlayer { player: u8, player_count: usize },
    /// Card text that could not be parsed.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// The player does not hold the card.
    #[error("{player} does not hold {card}")]
    CardNotHeld { player: PlayerId, card: Card },
    /// The same card was given twice.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// A card collection had the wrong number of cards.
    #[error("expected {expected} cards, got {actual}")]
    WrongCardCount { expected: &'static str, actual: usize },

    /// Dealing or crib scoring before a dealer exists.
    #[error("dealer not decided")]
    DealerNotSet,
    /// Cards are still out from the current round.
    #[error("cards from the current round are still out")]
    RoundInProgress,
    /// The crib already holds four cards.
    #[error("crib is full")]
    CribFull,
    /// The crib does not hold four cards yet.
    #[error("crib does not have four cards")]
    CribIncomplete,
    /// A player still has more than four cards, or fewer.
    #[error("not all hands have been finalized")]
    HandsNotFinalized,
    /// The player has already discarded down to four cards.
    #[error("{0} has already finalized their hand")]
    HandAlreadyFinalized(PlayerId),
    /// The starter card has not been cut this round.
    #[error("no starter card has been drawn")]
    StarterNotDrawn,
    /// The starter card was already cut this round.
    #[error("starter card already drawn")]
    StarterAlreadyDrawn,
    /// The draw pile ran out.
    #[error("draw pile is empty")]
    DrawPileEmpty,
    /// Someone else is next to play.
    #[error("not {player}'s turn; {expected} is next to play")]
    NotYourTurn { player: PlayerId, expected: PlayerId },
    /// The card was already played this round.
    #[error("{0} has already been played")]
    CardAlreadyPlayed(Card),
    /// Playing the card would push the count past 31.
    #[error("playing {card} would take the count from {count} past 31")]
    CountExceeded { card: Card, count: u32 },
    /// The player has no card that can legally be played.
    #[error("{0} has no playable card")]
    NoPlayableCard(PlayerId),
    /// A player has reached 121 and the game is finished.
    #[error("game is over")]
    GameOver,
}

impl CribbageError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPlayerCount(_)
            | Self::InvalidPlayer { .. }
            | Self::InvalidCard(_)
            | Self::CardNotHeld { .. }
            | Self::DuplicateCard(_)
            | Self::WrongCardCount { .. } => ErrorKind::InvalidArgument,
            _ => ErrorKind::IllegalState,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CribbageError>;
