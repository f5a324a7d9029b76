//! Show scoring: a four-card hand (or crib) plus the starter.
//!
//! The component functions take any slice of cards so the discard search can
//! reuse them on partial cribs; [`score_hand`] is the validated entry point.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Rank};
use crate::core::{CribbageError, Result, HAND_SIZE};

/// Whether a holding is a player's hand or the dealer's crib.
///
/// The two differ only in the flush rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandKind {
    Hand,
    Crib,
}

/// Breakdown of a show score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandScore {
    pub fifteens: u32,
    pub runs: u32,
    pub pairs: u32,
    pub flush: u32,
    pub nobs: u32,
    pub total: u32,
}

/// Occurrences of each rank value, indexed 1..=13.
fn rank_counts(cards: &[Card]) -> [u32; 14] {
    let mut counts = [0u32; 14];
    for card in cards {
        counts[card.rank_value() as usize] += 1;
    }
    counts
}

/// Two points for every distinct subset of `cards` whose values sum to 15.
#[must_use]
pub fn fifteens(cards: &[Card]) -> u32 {
    fn subsets(values: &[u32], remaining: u32) -> u32 {
        match values.split_first() {
            None => 0,
            Some((&v, rest)) => {
                let with = match v.cmp(&remaining) {
                    std::cmp::Ordering::Equal => 1,
                    std::cmp::Ordering::Less => subsets(rest, remaining - v),
                    std::cmp::Ordering::Greater => 0,
                };
                with + subsets(rest, remaining)
            }
        }
    }

    let values: SmallVec<[u32; 6]> = cards.iter().map(|c| c.value()).collect();
    2 * subsets(&values, 15)
}

/// Points for runs of three or more.
///
/// Each maximal chain of consecutive ranks scores its length times the
/// product of how often each of its ranks occurs, so a double run of three
/// scores 6 and a double-double run scores 12.
#[must_use]
pub fn runs(cards: &[Card]) -> u32 {
    let counts = rank_counts(cards);
    let mut total = 0;
    let mut rank = 1;

    while rank <= 13 {
        if counts[rank] == 0 {
            rank += 1;
            continue;
        }
        let mut length = 0;
        let mut multiplier = 1;
        while rank <= 13 && counts[rank] > 0 {
            length += 1;
            multiplier *= counts[rank];
            rank += 1;
        }
        if length >= 3 {
            total += length * multiplier;
        }
    }

    total
}

/// Two points per pair: k cards of one rank score k(k−1).
#[must_use]
pub fn pairs(cards: &[Card]) -> u32 {
    rank_counts(cards).iter().map(|&k| k * k.saturating_sub(1)).sum()
}

/// Flush points.
///
/// A hand of one suit scores 4, or 5 if the starter matches. A crib scores
/// 5 only when the starter matches as well.
#[must_use]
pub fn flush(hand: &[Card], starter: Card, kind: HandKind) -> u32 {
    let Some(first) = hand.first() else {
        return 0;
    };
    if !hand.iter().all(|c| c.suit() == first.suit()) {
        return 0;
    }
    let starter_matches = starter.suit() == first.suit();
    match (kind, starter_matches) {
        (_, true) => hand.len() as u32 + 1,
        (HandKind::Hand, false) => hand.len() as u32,
        (HandKind::Crib, false) => 0,
    }
}

/// One point for holding the jack of the starter's suit.
#[must_use]
pub fn nobs(hand: &[Card], starter: Card) -> u32 {
    u32::from(hand.contains(&Card::new(starter.suit(), Rank::Jack)))
}

/// Score four cards against the starter.
///
/// ```
/// use cribbage_engine::cards::Hand;
/// use cribbage_engine::scoring::{score_hand, HandKind};
///
/// let hand: Hand = "5H 5D 5C JS".parse().unwrap();
/// let starter = "5S".parse().unwrap();
/// let score = score_hand(hand.as_slice(), starter, HandKind::Hand).unwrap();
/// assert_eq!(score.total, 29);
/// ```
pub fn score_hand(hand: &[Card], starter: Card, kind: HandKind) -> Result<HandScore> {
    if hand.len() != HAND_SIZE {
        return Err(CribbageError::WrongCardCount {
            expected: "4",
            actual: hand.len(),
        });
    }
    for (i, card) in hand.iter().enumerate() {
        if hand[..i].contains(card) || *card == starter {
            return Err(CribbageError::DuplicateCard(*card));
        }
    }

    let mut all = [starter; HAND_SIZE + 1];
    all[..HAND_SIZE].copy_from_slice(hand);

    let mut score = HandScore {
        fifteens: fifteens(&all),
        runs: runs(&all),
        pairs: pairs(&all),
        flush: flush(hand, starter, kind),
        nobs: nobs(hand, starter),
        total: 0,
    };
    score.total = score.fifteens + score.runs + score.pairs + score.flush + score.nobs;
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hand;

    fn cards(s: &str) -> Vec<Card> {
        s.parse::<Hand>().unwrap().as_slice().to_vec()
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn score(hand: &str, starter: &str) -> HandScore {
        score_hand(&cards(hand), card(starter), HandKind::Hand).unwrap()
    }

    #[test]
    fn test_perfect_hand() {
        let s = score("5H 5D 5C JS", "5S");
        assert_eq!(s.fifteens, 16);
        assert_eq!(s.pairs, 12);
        assert_eq!(s.runs, 0);
        assert_eq!(s.flush, 0);
        assert_eq!(s.nobs, 1);
        assert_eq!(s.total, 29);
    }

    #[test]
    fn test_perfect_hand_heart_starter() {
        let s = score("JH 5D 5S 5C", "5H");
        assert_eq!((s.fifteens, s.runs, s.pairs, s.flush, s.nobs), (16, 0, 12, 0, 1));
        assert_eq!(s.total, 29);
    }

    #[test]
    fn test_five_fives_with_jack_of_hearts() {
        // Jack of hearts does not match a spade starter.
        let s = score("5H 5D 5C JH", "5S");
        assert_eq!(s, HandScore { fifteens: 16, runs: 0, pairs: 12, flush: 0, nobs: 0, total: 28 });
    }

    #[test]
    fn test_fifteens() {
        assert_eq!(fifteens(&cards("10H 5D")), 2);
        assert_eq!(fifteens(&cards("AC 2C 3C 4C 5C")), 2);
        assert_eq!(fifteens(&cards("7C 8D 7H 8S")), 8);
        assert_eq!(fifteens(&cards("KC QC JC")), 0);
    }

    #[test]
    fn test_runs() {
        assert_eq!(runs(&cards("3C 4D 5H")), 3);
        assert_eq!(runs(&cards("3C 4D 5H 6S 7C")), 5);
        assert_eq!(runs(&cards("3C 3D 4H 5S")), 6);
        assert_eq!(runs(&cards("3C 3D 4H 4S 5C")), 12);
        assert_eq!(runs(&cards("3C 3D 3H 4S 5C")), 9);
        assert_eq!(runs(&cards("AC 2D 4H 5S")), 0);
        assert_eq!(runs(&cards("JC QD KH AS")), 3);
    }

    #[test]
    fn test_pairs() {
        assert_eq!(pairs(&cards("5C 5D")), 2);
        assert_eq!(pairs(&cards("5C 5D 5H")), 6);
        assert_eq!(pairs(&cards("5C 5D 5H 5S")), 12);
        assert_eq!(pairs(&cards("5C 5D 6H 6S")), 4);
    }

    #[test]
    fn test_flush_rules() {
        let hand = cards("2H 4H 6H 8H");
        assert_eq!(flush(&hand, card("KS"), HandKind::Hand), 4);
        assert_eq!(flush(&hand, card("KH"), HandKind::Hand), 5);
        assert_eq!(flush(&hand, card("KS"), HandKind::Crib), 0);
        assert_eq!(flush(&hand, card("KH"), HandKind::Crib), 5);
        assert_eq!(flush(&cards("2H 4H 6H 8S"), card("KH"), HandKind::Hand), 0);
    }

    #[test]
    fn test_nobs() {
        assert_eq!(nobs(&cards("JD 2C 3C 4C"), card("9D")), 1);
        assert_eq!(nobs(&cards("JD 2C 3C 4C"), card("9C")), 0);
    }

    #[test]
    fn test_zero_hand() {
        assert_eq!(score("2C 4D 6H 8S", "KC").total, 0);
    }

    #[test]
    fn test_score_hand_validation() {
        let err = score_hand(&cards("5H 5D 5C"), card("5S"), HandKind::Hand).unwrap_err();
        assert!(matches!(err, CribbageError::WrongCardCount { actual: 3, .. }));

        let err = score_hand(&cards("5H 5D 5C 5S"), card("5S"), HandKind::Hand).unwrap_err();
        assert_eq!(err, CribbageError::DuplicateCard(card("5S")));
    }
}
