//! A player that picks uniformly among legal moves.

use super::CribbageAI;
use crate::cards::{Card, Hand};
use crate::core::{CribbageError, GameRng, PlayerId, Result, HAND_SIZE};
use crate::game::CribbageGame;

/// Uniform random strategy. Mostly useful as a baseline opponent.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl CribbageAI for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn select_keep(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Hand> {
        let mut hand = game.hand(pid)?;
        while hand.len() > HAND_SIZE {
            hand.take_random(&mut self.rng);
        }
        Ok(hand)
    }

    fn select_play(&mut self, game: &CribbageGame, pid: PlayerId) -> Result<Card> {
        let playable = game.playable_cards(pid)?;
        self.rng
            .choose(&playable)
            .copied()
            .ok_or(CribbageError::NoPlayableCard(pid))
    }
}
