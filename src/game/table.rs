//! Drives a full game between computer players.
//!
//! A `Table` owns one `CribbageGame` and a strategy per seat and runs rounds
//! through the phase operations in order, asking each strategy for its
//! decisions. Nothing here bends the rules: every move goes through the same
//! validated calls a human front end would use.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::CribbageGame;
use crate::ai::CribbageAI;
use crate::core::{CribbageError, PlayerId, Result};

/// Outcome of a finished (or abandoned) game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// The player who reached 121, if the game got that far.
    pub winner: Option<PlayerId>,

    /// Final scores by seat.
    pub scores: Vec<u32>,

    /// Rounds started.
    pub rounds: usize,
}

/// A game plus one strategy per seat.
pub struct Table {
    game: CribbageGame,
    players: Vec<Box<dyn CribbageAI>>,
    max_rounds: usize,
}

impl Table {
    /// Seat `players` at `game`, one per seat in seat order.
    pub fn new(game: CribbageGame, players: Vec<Box<dyn CribbageAI>>) -> Result<Self> {
        if players.len() != game.player_count() {
            return Err(CribbageError::InvalidPlayerCount(players.len()));
        }
        Ok(Self {
            game,
            players,
            max_rounds: 100,
        })
    }

    /// Give up after this many rounds. A real game ends well within the
    /// default of 100.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn game(&self) -> &CribbageGame {
        &self.game
    }

    /// Deal, discard, cut, play and count one round, then pass the deal.
    ///
    /// Stops as soon as someone reaches 121; the round is then left as is.
    pub fn play_round(&mut self) -> Result<()> {
        if self.game.dealer().is_none() {
            self.game.cut_for_dealer()?;
        }
        let n = self.game.player_count();
        self.game.deal_hands()?;

        for pid in PlayerId::all(n) {
            let keep = self.players[pid.index()].select_keep(&self.game, pid)?;
            let dealt = self.game.hand(pid)?;
            let discards: Vec<_> = dealt.iter().filter(|&c| !keep.contains(c)).collect();
            for card in discards {
                self.game.send_card_to_crib(pid, card)?;
            }
        }

        self.game.pick_starter_card()?;
        if self.game.game_over() {
            return Ok(());
        }

        while !self.game.round_over() {
            if !self.game.move_possible() {
                self.game.reset_count();
                continue;
            }
            let pid = self.game.next_to_play().ok_or(CribbageError::DealerNotSet)?;
            let card = self.players[pid.index()].select_play(&self.game, pid)?;
            self.game.play_card(pid, card)?;
        }
        if self.game.game_over() {
            return Ok(());
        }

        let dealer = self.game.dealer().ok_or(CribbageError::DealerNotSet)?;
        for pid in dealer.clockwise_from(n) {
            self.game.count_hand(pid, true)?;
            if self.game.game_over() {
                return Ok(());
            }
        }
        self.game.count_crib()?;
        if self.game.game_over() {
            return Ok(());
        }

        debug!(scores = ?self.game.scores(), "round finished");
        self.game.clear_round_state()
    }

    /// Play rounds until someone wins or the round limit is hit.
    pub fn play_game(&mut self) -> Result<GameSummary> {
        let mut rounds = 0;
        while !self.game.game_over() && rounds < self.max_rounds {
            self.play_round()?;
            rounds += 1;
        }

        let summary = GameSummary {
            winner: self.game.winner(),
            scores: self.game.scores(),
            rounds,
        };
        let names: Vec<&str> = self.players.iter().map(|p| p.name()).collect();
        info!(
            players = ?names,
            winner = ?summary.winner,
            scores = ?summary.scores,
            rounds,
            "game finished"
        );
        Ok(summary)
    }

    /// Name of the strategy in a seat.
    pub fn player_name(&self, pid: PlayerId) -> Result<&str> {
        self.players
            .get(pid.index())
            .map(|p| p.name())
            .ok_or(CribbageError::InvalidPlayer {
                player: pid.0,
                player_count: self.players.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomPlayer;
    use crate::core::{GameConfig, WINNING_SCORE};

    fn random_table(player_count: usize, seed: u64) -> Table {
        let config = GameConfig::new(player_count).unwrap().with_seed(seed);
        let game = CribbageGame::new(config).unwrap();
        let players = (0..player_count as u64)
            .map(|i| Box::new(RandomPlayer::new(seed + i)) as Box<dyn CribbageAI>)
            .collect();
        Table::new(game, players).unwrap()
    }

    #[test]
    fn test_seat_count_must_match() {
        let game = CribbageGame::new(GameConfig::default()).unwrap();
        let players: Vec<Box<dyn CribbageAI>> = vec![Box::new(RandomPlayer::new(1))];
        assert!(matches!(
            Table::new(game, players),
            Err(CribbageError::InvalidPlayerCount(1))
        ));
    }

    #[test]
    fn test_round_passes_deal() {
        let mut table = random_table(2, 5);
        table.play_round().unwrap();
        let game = table.game();

        if !game.game_over() {
            assert!(game.dealer().is_some());
            assert_eq!(game.draw_pile_len(), 52);
            assert!(game.scores().iter().sum::<u32>() > 0);
            assert!(game.hand(PlayerId::new(0)).unwrap().is_empty());
        }
    }

    #[test]
    fn test_random_game_finishes() {
        for player_count in [2, 3] {
            let mut table = random_table(player_count, 17);
            let summary = table.play_game().unwrap();

            let winner = summary.winner.unwrap();
            assert_eq!(summary.scores[winner.index()], WINNING_SCORE);
            assert_eq!(summary.scores.iter().filter(|&&s| s == WINNING_SCORE).count(), 1);
            assert!(summary.rounds > 1);
        }
    }

    #[test]
    fn test_round_limit() {
        let mut table = random_table(2, 9).with_max_rounds(1);
        let summary = table.play_game().unwrap();
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.winner, None);
    }

    #[test]
    fn test_player_name() {
        let table = random_table(2, 1);
        assert_eq!(table.player_name(PlayerId::new(1)).unwrap(), "random");
        assert!(table.player_name(PlayerId::new(2)).is_err());
    }
}
