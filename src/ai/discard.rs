//! Expected-value discard selection.
//!
//! Every four-card subset of the deal is scored by its expected show value
//! over the possible starters, plus (dealer) or minus (non-dealer) the
//! expected value of the crib the discards feed. Suits are ignored except
//! where they matter (flush, nobs), which keeps the enumeration to rank
//! values: 13 starters times 13² (or 13³) crib completions per subset.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{Card, Hand, Rank, Suit};
use crate::core::{CribbageError, Result, CRIB_SIZE, DECK_SIZE, HAND_SIZE};
use crate::scoring::{fifteens, flush, nobs, pairs, runs, HandKind};

type Cards = SmallVec<[Card; 6]>;

/// Remaining copies of each rank value (1..=13) once `dealt` is removed.
fn remaining_ranks(dealt: &[Card]) -> [u32; 14] {
    let mut counts = [4u32; 14];
    counts[0] = 0;
    for card in dealt {
        counts[card.rank_value() as usize] -= 1;
    }
    counts
}

/// Fifteens, pairs and runs: the suit-blind part of a score.
fn rank_points(cards: &[Card]) -> u32 {
    fifteens(cards) + pairs(cards) + runs(cards)
}

/// Expected crib points given the known discards and starter.
///
/// `counts` already excludes the dealt cards; the starter's rank is taken
/// out here. `unseen` is the number of cards neither dealt nor cut.
fn expected_crib(
    dealt: &[Card],
    discards: &[Card],
    starter: Card,
    mut counts: [u32; 14],
    unseen: usize,
) -> f64 {
    fn fill(crib: &mut Cards, counts: &mut [u32; 14], unseen: usize) -> f64 {
        if crib.len() == CRIB_SIZE + 1 {
            return f64::from(rank_points(crib));
        }
        let mut expected = 0.0;
        for rank in Rank::ALL {
            let r = rank.rank_value() as usize;
            if counts[r] == 0 {
                continue;
            }
            let probability = f64::from(counts[r]) / unseen as f64;
            counts[r] -= 1;
            // Suit is irrelevant to fifteens, pairs and runs.
            crib.push(Card::new(Suit::Club, rank));
            expected += probability * fill(crib, counts, unseen - 1);
            crib.pop();
            counts[r] += 1;
        }
        expected
    }

    counts[starter.rank_value() as usize] -= 1;
    let mut crib: Cards = discards.iter().copied().collect();
    crib.push(starter);
    let mut expected = fill(&mut crib, &mut counts, unseen);

    // A lone discard says nothing about a flush.
    if let [first, rest @ ..] = discards {
        if !rest.is_empty() && rest.iter().all(|c| c.suit() == first.suit()) {
            let unknown = CRIB_SIZE - discards.len();
            expected += 4.0 * flush_probability(first.suit(), dealt, unknown, unseen);
        }
    }
    expected
}

/// Chance that all `unknown` crib cards are of `suit`.
fn flush_probability(suit: Suit, dealt: &[Card], unknown: usize, unseen: usize) -> f64 {
    let out = 13 - dealt.iter().filter(|c| c.suit() == suit).count();
    (0..unknown)
        .map(|t| out.saturating_sub(t) as f64 / (unseen - t) as f64)
        .product()
}

/// Expected points of keeping `keep` and throwing `discards` to the crib.
///
/// Positive crib value counts for the dealer and against everyone else.
#[must_use]
pub fn expected_value(keep: &[Card], discards: &[Card], is_dealer: bool) -> f64 {
    let dealt: Cards = keep.iter().chain(discards).copied().collect();
    let counts = remaining_ranks(&dealt);
    let unseen = DECK_SIZE - dealt.len();

    let mut expected = 0.0;
    for rank in Rank::ALL {
        let r = rank.rank_value() as usize;
        if counts[r] == 0 {
            continue;
        }
        let Some(starter) = Suit::ALL
            .iter()
            .map(|&suit| Card::new(suit, rank))
            .find(|c| !dealt.contains(c))
        else {
            continue;
        };
        let probability = f64::from(counts[r]) / unseen as f64;

        let mut show: Cards = keep.iter().copied().collect();
        show.push(starter);
        let points = rank_points(&show) + flush(keep, starter, HandKind::Hand) + nobs(keep, starter);
        expected += probability * f64::from(points);

        let crib = expected_crib(&dealt, discards, starter, counts, unseen - 1);
        if is_dealer {
            expected += probability * crib;
        } else {
            expected -= probability * crib;
        }
    }
    expected
}

/// Include/exclude search over four-card subsets of a deal.
struct KeepSearch<'a> {
    dealt: &'a [Card],
    is_dealer: bool,
    memo: FxHashMap<u64, f64>,
}

impl KeepSearch<'_> {
    fn evaluate(&mut self, keep: &[Card]) -> f64 {
        let key = keep.iter().fold(0, |acc, c| acc | c.bit());
        if let Some(&ev) = self.memo.get(&key) {
            return ev;
        }
        let discards: Cards = self
            .dealt
            .iter()
            .copied()
            .filter(|c| !keep.contains(c))
            .collect();
        let ev = expected_value(keep, &discards, self.is_dealer);
        self.memo.insert(key, ev);
        ev
    }

    fn best(&mut self, kept: &mut Cards, idx: usize) -> Option<(Cards, f64)> {
        if kept.len() == HAND_SIZE {
            let ev = self.evaluate(kept);
            return Some((kept.clone(), ev));
        }
        let skipped = idx - kept.len();
        if idx == self.dealt.len() || skipped > self.dealt.len() - HAND_SIZE {
            return None;
        }

        kept.push(self.dealt[idx]);
        let include = self.best(kept, idx + 1);
        kept.pop();
        let exclude = self.best(kept, idx + 1);

        match (include, exclude) {
            (Some(i), Some(e)) => Some(if i.1 >= e.1 { i } else { e }),
            (i, e) => i.or(e),
        }
    }
}

/// The four cards of a five- or six-card deal with the highest expected
/// value. Ties go to the subset found first, which favours earlier cards.
///
/// ```
/// use cribbage_engine::ai::select_keep;
/// use cribbage_engine::cards::Hand;
///
/// let dealt: Hand = "5H 5D 5C 5S KC 2D".parse().unwrap();
/// let keep = select_keep(&dealt, false).unwrap();
/// assert_eq!(keep.to_string(), "5H 5D 5C 5S");
/// ```
pub fn select_keep(dealt: &Hand, is_dealer: bool) -> Result<Hand> {
    if !(HAND_SIZE + 1..=HAND_SIZE + 2).contains(&dealt.len()) {
        return Err(CribbageError::WrongCardCount {
            expected: "5 or 6",
            actual: dealt.len(),
        });
    }

    let mut search = KeepSearch {
        dealt: dealt.as_slice(),
        is_dealer,
        memo: FxHashMap::default(),
    };
    let (keep, ev) = search
        .best(&mut Cards::new(), 0)
        .ok_or(CribbageError::WrongCardCount {
            expected: "5 or 6",
            actual: dealt.len(),
        })?;

    let keep: Hand = keep.into_iter().collect();
    debug!(%dealt, %keep, ev, is_dealer, "selected keep");
    Ok(keep)
}
