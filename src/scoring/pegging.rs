//! Pegging: points scored during the play.
//!
//! The play stack is an `im::Vector` with the most recent card at the front.
//! These functions only read it; the game awards the points.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Points earned by a single `play_card`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegScore {
    /// Everything below, summed.
    pub total: u32,
    pub runs: u32,
    pub pairs: u32,
    /// 2 for bringing the count to exactly 15 or 31.
    pub special: u32,
    /// 1 for the last card when nobody can play and the count is short of 31.
    pub go: u32,
}

impl PegScore {
    pub(crate) fn new(runs: u32, pairs: u32, special: u32, go: u32) -> Self {
        Self {
            total: runs + pairs + special + go,
            runs,
            pairs,
            special,
            go,
        }
    }
}

/// Pairs in sequence: k cards of the same rank on top of the stack score
/// k(k−1), so a pair royal is 6 and a double pair royal 12.
#[must_use]
pub fn peg_pairs(stack: &Vector<Card>) -> u32 {
    let Some(top) = stack.front() else {
        return 0;
    };
    let k = stack.iter().take_while(|c| c.rank() == top.rank()).count() as u32;
    k * (k - 1)
}

/// Runs in sequence: the length of the longest window of the most recent
/// cards (three or more) whose ranks, in any order, are strictly
/// consecutive. Zero when there is none.
///
/// ```
/// use cribbage_engine::cards::Card;
/// use cribbage_engine::scoring::peg_runs;
///
/// // Played 4, 6, 5 (most recent first below).
/// let stack: im::Vector<Card> = ["5D", "6C", "4H"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(peg_runs(&stack), 3);
/// ```
#[must_use]
pub fn peg_runs(stack: &Vector<Card>) -> u32 {
    let mut longest = 0;
    let mut window: Vec<u32> = Vec::with_capacity(stack.len());

    for (i, card) in stack.iter().enumerate() {
        window.push(card.rank_value());
        let n = i + 1;
        if n < 3 {
            continue;
        }
        let mut sorted = window.clone();
        sorted.sort_unstable();
        if sorted.windows(2).all(|w| w[0] + 1 == w[1]) {
            longest = n as u32;
        }
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a stack from cards listed in play order (oldest first).
    fn played(cards: &str) -> Vector<Card> {
        let mut stack = Vector::new();
        for text in cards.split_whitespace() {
            stack.push_front(text.parse().unwrap());
        }
        stack
    }

    #[test]
    fn test_pairs_in_sequence() {
        assert_eq!(peg_pairs(&Vector::new()), 0);
        assert_eq!(peg_pairs(&played("5C")), 0);
        assert_eq!(peg_pairs(&played("5C 5D")), 2);
        assert_eq!(peg_pairs(&played("5C 5D 5H")), 6);
        assert_eq!(peg_pairs(&played("5C 5D 5H 5S")), 12);
    }

    #[test]
    fn test_pairs_broken_by_other_rank() {
        assert_eq!(peg_pairs(&played("5C 6D 5H")), 0);
        assert_eq!(peg_pairs(&played("5C 6D 6H")), 2);
    }

    #[test]
    fn test_runs_any_order() {
        assert_eq!(peg_runs(&played("4C 6D 5H")), 3);
        assert_eq!(peg_runs(&played("4C 6D 5H 3S")), 4);
        assert_eq!(peg_runs(&played("4C 6D 5H 3S 7C")), 5);
    }

    #[test]
    fn test_runs_broken() {
        assert_eq!(peg_runs(&played("4C 5D")), 0);
        assert_eq!(peg_runs(&played("4C 5D 5H")), 0);
        assert_eq!(peg_runs(&played("4C 6D 8H")), 0);
        // A duplicate in the most recent three kills the run even though an
        // older window would otherwise extend it.
        assert_eq!(peg_runs(&played("3C 4D 5H 5S")), 0);
    }

    #[test]
    fn test_runs_longest_window_wins() {
        // Last three (9 8 7) run, last four include the K so they do not.
        assert_eq!(peg_runs(&played("KC 7D 8H 9S")), 3);
        // Older cards beyond the run do not matter.
        assert_eq!(peg_runs(&played("2C 2D 3H 4S 5C")), 4);
    }

    #[test]
    fn test_pegging_ace_low() {
        assert_eq!(peg_runs(&played("QC KD AH")), 0);
        assert_eq!(peg_runs(&played("AC 2D 3H")), 3);
    }

    #[test]
    fn test_peg_score_total() {
        let score = PegScore::new(3, 2, 2, 1);
        assert_eq!(score.total, 8);
    }
}
