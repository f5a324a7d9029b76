//! The playing card value type.
//!
//! `Card` is a 2-byte `Copy` value. Ordering is by rank first, then suit, so
//! sorting a hand groups equal ranks together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::CribbageError;

/// Card suit, in bridge order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    /// All four suits in order.
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// 0-based position in [`Suit::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    fn symbol(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }
}

/// Card rank, ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All thirteen ranks, ace first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// 0-based position in [`Rank::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank from a 1-based rank value (ace = 1, king = 13).
    #[must_use]
    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Counting value: face cards count ten.
    #[must_use]
    pub const fn value(self) -> u32 {
        let v = self as u32 + 1;
        if v > 10 { 10 } else { v }
    }

    /// Rank value, ace = 1 through king = 13. Used for runs and pairs.
    #[must_use]
    pub const fn rank_value(self) -> u32 {
        self as u32 + 1
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card.
///
/// ```
/// use cribbage_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "10S".parse().unwrap();
/// assert_eq!(card, Card::new(Suit::Spade, Rank::Ten));
/// assert_eq!(card.value(), 10);
/// assert_eq!(card.to_string(), "10S");
/// ```
// Field order matters: the derived `Ord` compares rank before suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { rank, suit }
    }

    /// Card with the given id, if `id < 52`.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Card> {
        let suit = *Suit::ALL.get(usize::from(id) / 13)?;
        Some(Card::new(suit, Rank::ALL[usize::from(id) % 13]))
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Counting value (1..=10).
    #[must_use]
    pub const fn value(self) -> u32 {
        self.rank.value()
    }

    /// Rank value (1..=13).
    #[must_use]
    pub const fn rank_value(self) -> u32 {
        self.rank.rank_value()
    }

    /// Stable id in `0..52`, suit-major.
    #[must_use]
    pub const fn id(self) -> u8 {
        (self.suit as u8) * 13 + self.rank as u8
    }

    /// Single-bit mask of this card's id, for card sets packed into a `u64`.
    #[must_use]
    pub const fn bit(self) -> u64 {
        1u64 << self.id()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CribbageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || CribbageError::InvalidCard(s.to_string());

        let split = text.len().checked_sub(1).filter(|&i| text.is_char_boundary(i)).ok_or_else(invalid)?;
        let (rank_text, suit_text) = text.split_at(split);

        let suit = match suit_text.to_ascii_uppercase().as_str() {
            "C" => Suit::Club,
            "D" => Suit::Diamond,
            "H" => Suit::Heart,
            "S" => Suit::Spade,
            _ => return Err(invalid()),
        };
        let rank = match rank_text.to_ascii_uppercase().as_str() {
            "A" | "1" => Rank::Ace,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            digit => digit
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=9).contains(v))
                .and_then(Rank::from_value)
                .ok_or_else(invalid)?,
        };

        Ok(Card::new(suit, rank))
    }
}
