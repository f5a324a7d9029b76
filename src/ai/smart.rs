//! Expected-value discards and tree-search card play.

use super::{discard, CribbageAI};
use crate::cards::{Card, Hand};
use crate::core::{PlayerId, Result, HAND_SIZE};
use crate::game::CribbageGame;
use crate::mcts::{MCTSConfig, MCTSSearch};

/// The strongest built-in strategy.
///
/// Keeps the four cards with the best expected show-plus-crib value, then
/// plays each card by Monte Carlo tree search over the rest of the round.
pub struct SmartPlayer {
    search: MCTSSearch,
}

impl SmartPlayer {
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            search: MCTSSearch::new(config),
        }
    }

    /// Default search budget with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(MCTSConfig::default().with_seed(seed))
    }

    /// The search used for card play, for inspecting its last run.
    #[must_use]
    pub fn search(&self) -> &MCTSSearch {
        &self.search
    }
}

impl CribbageAI for SmartPlayer {
    fn name(&self) -> &str {
        "smart"
    }

    fn select_keep(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Hand> {
        let hand = game.hand(pid)?;
        if hand.len() <= HAND_SIZE {
            return Ok(hand);
        }
        discard::select_keep(&hand, game.dealer() == Some(pid))
    }

    fn select_play(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Card> {
        self.search.search(game, pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CribbageGameBuilder;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_keep_uses_discard_search() {
        let game = CribbageGameBuilder::new(2)
            .dealer(p(0))
            .hand(p(0), "5H 5D 5C 5S KC 2D".parse().unwrap())
            .build()
            .unwrap();
        let mut player = SmartPlayer::with_seed(1);

        let keep = player.select_keep(&game, p(0)).unwrap();
        assert_eq!(keep.to_string(), "5H 5D 5C 5S");
    }

    #[test]
    fn test_keep_after_discarding_is_unchanged() {
        let game = CribbageGameBuilder::new(2)
            .dealer(p(1))
            .hand(p(0), "AC 2C 3C 4C".parse().unwrap())
            .build()
            .unwrap();
        let mut player = SmartPlayer::with_seed(1);

        let keep = player.select_keep(&game, p(0)).unwrap();
        assert_eq!(keep, game.hand(p(0)).unwrap());
    }

    #[test]
    fn test_play_runs_search() {
        let game = CribbageGameBuilder::new(2)
            .dealer(p(1))
            .hand(p(0), "8S 8H 7S 6S".parse().unwrap())
            .hand(p(1), "KD 7D 4C 5S".parse().unwrap())
            .crib("AC AD AH AS".parse().unwrap())
            .starter("2C".parse().unwrap())
            .build()
            .unwrap();
        let mut player = SmartPlayer::new(MCTSConfig::default().with_iterations(100));

        let card = player.select_play(&game, p(0)).unwrap();

        assert!(game.hand(p(0)).unwrap().contains(card));
        assert_eq!(player.search().stats().iterations, 100);
    }
}
