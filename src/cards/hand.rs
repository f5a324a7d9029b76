//! Duplicate-free card container.
//!
//! `Hand` backs every pile in the game: the draw pile, each player's hand,
//! the crib and the per-player played piles. Insertion order is preserved so
//! that drawing from the top or by offset is meaningful after a shuffle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use super::card::{Card, Rank, Suit};
use crate::core::{CribbageError, GameRng, Result};

/// A duplicate-free, ordered collection of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; 6]>,
}

impl Hand {
    /// Empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The 52-card deck in id order (unshuffled).
    #[must_use]
    pub fn standard_deck() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
            .collect();
        Self { cards }
    }

    /// Build a hand from cards, rejecting duplicates.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut hand = Self::new();
        for card in cards {
            if !hand.add(card) {
                return Err(CribbageError::DuplicateCard(card));
            }
        }
        Ok(hand)
    }

    /// Add a card. Returns `false` (and leaves the hand unchanged) if the card
    /// is already present.
    pub fn add(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Remove a card. Returns `false` if the card was not present.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.position(card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Position of a card, if present.
    #[must_use]
    pub fn position(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `offset` without removing it.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<Card> {
        self.cards.get(offset).copied()
    }

    /// Sort by rank, then suit.
    pub fn sort(&mut self) {
        self.cards.sort_unstable();
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the card at `offset`.
    pub fn take(&mut self, offset: usize) -> Option<Card> {
        (offset < self.cards.len()).then(|| self.cards.remove(offset))
    }

    /// Remove and return the first card.
    pub fn take_top(&mut self) -> Option<Card> {
        self.take(0)
    }

    /// Remove and return a uniformly random card.
    pub fn take_random(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.is_empty() {
            return None;
        }
        let offset = rng.gen_range_usize(0..self.cards.len());
        self.take(offset)
    }

    /// The set of card ids packed into a bit mask.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.cards.iter().fold(0, |acc, c| acc | c.bit())
    }

    /// Copy out as a sorted `Vec`.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<Card> {
        let mut cards = self.cards.to_vec();
        cards.sort_unstable();
        cards
    }
}

/// Collects cards, silently dropping repeats.
impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for card in iter {
            hand.add(card);
        }
        hand
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = Card;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Card>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter().copied()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// Parses whitespace- or comma-separated cards, e.g. `"5H 5D 5C JH"`.
impl FromStr for Hand {
    type Err = CribbageError;

    fn from_str(s: &str) -> Result<Self> {
        let cards = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Card>>>()?;
        Self::from_cards(cards)
    }
}
