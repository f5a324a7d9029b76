//! Game configuration and rule constants.
//!
//! A table is configured once at construction with a `GameConfig`. The
//! numbers of the game itself (31, 121, four cards per hand) are constants,
//! not configuration.

use serde::{Deserialize, Serialize};

use super::error::{CribbageError, Result};

/// Highest legal running count during the play.
pub const MAX_COUNT: u32 = 31;

/// Score that ends the game. Scores saturate here.
pub const WINNING_SCORE: u32 = 121;

/// Cards each player keeps after discarding.
pub const HAND_SIZE: usize = 4;

/// Cards in the crib once everyone has discarded.
pub const CRIB_SIZE: usize = 4;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;

/// Table configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2 or 3).
    pub player_count: usize,

    /// Seed for the game's random stream.
    pub seed: u64,
}

impl GameConfig {
    /// Create a configuration for `player_count` players.
    ///
    /// ```
    /// use cribbage_engine::core::GameConfig;
    ///
    /// let config = GameConfig::new(3).unwrap().with_seed(7);
    /// assert_eq!(config.cards_dealt(), 5);
    /// assert!(GameConfig::new(4).is_err());
    /// ```
    pub fn new(player_count: usize) -> Result<Self> {
        if !(2..=3).contains(&player_count) {
            return Err(CribbageError::InvalidPlayerCount(player_count));
        }
        Ok(Self {
            player_count,
            seed: DEFAULT_SEED,
        })
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check a deserialized or hand-built configuration.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.player_count).map(|_| ())
    }

    /// Cards dealt to each player: six heads-up, five three-handed.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        if self.player_count == 2 { 6 } else { 5 }
    }

    /// Cards each player sends to the crib.
    #[must_use]
    pub fn discards_per_player(&self) -> usize {
        self.cards_dealt() - HAND_SIZE
    }

    /// Cards dealt straight into the crib from the deck.
    #[must_use]
    pub fn cards_to_crib_from_deck(&self) -> usize {
        CRIB_SIZE - self.player_count * self.discards_per_player()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: DEFAULT_SEED,
        }
    }
}
