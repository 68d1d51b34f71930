// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use ahash::AHashSet;
use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::VecDeque, fmt, str::FromStr};
use thiserror::Error;

/// Errors returned when building cards and decks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The input doesn't name a known rank and suit.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// A stacked deck contains the same card twice.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// A Poker card.
///
/// Two cards are equal only if both rank and suit match, use [Card::cmp_rank]
/// to compare cards by rank strength ignoring the suit.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Compares two cards by rank only, a deuce is the lowest and an ace the
    /// highest card.
    pub fn cmp_rank(&self, other: &Card) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses a card from a rank followed by a suit, e.g. `"AS"` or `"10H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CardError::InvalidCard(s.to_string());

        let split = s.char_indices().last().map(|(idx, _)| idx).ok_or_else(invalid)?;
        if split == 0 {
            return Err(invalid());
        }

        let (rank, suit) = s.split_at(split);
        let rank = rank.parse::<Rank>().map_err(|_| invalid())?;
        let suit = suit.parse::<Suit>().map_err(|_| invalid())?;
        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

impl FromStr for Rank {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" | "JACK" => Rank::Jack,
            "Q" | "QUEEN" => Rank::Queen,
            "K" | "KING" => Rank::King,
            "A" | "ACE" => Rank::Ace,
            _ => return Err(CardError::InvalidCard(s.to_string())),
        };

        Ok(rank)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Clubs suit.
    Clubs,
    /// Spades suit.
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s.trim().to_ascii_uppercase().as_str() {
            "D" | "DIAMONDS" => Suit::Diamonds,
            "H" | "HEARTS" => Suit::Hearts,
            "C" | "CLUBS" => Suit::Clubs,
            "S" | "SPADES" => Suit::Spades,
            _ => return Err(CardError::InvalidCard(s.to_string())),
        };

        Ok(suit)
    }
}

impl Suit {
    /// Returns all suits in deck order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades].into_iter()
    }
}

/// A cards Deck, cards are dealt from the top of the deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Creates a stacked deck that deals the given cards in order.
    ///
    /// Returns an error if a card appears more than once.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CardError> {
        let mut seen = AHashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(*card) {
                return Err(CardError::DuplicateCard(*card));
            }
        }

        Ok(Self {
            cards: cards.into(),
        })
    }

    /// Puts all the cards back in the deck in suit and rank order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(
            Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s))),
        );
    }

    /// Shuffles the cards left in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Resets the deck and shuffles it, a seed gives the same cards order every
    /// time the deck is shuffled with it.
    pub fn reset_and_shuffle(&mut self, seed: Option<u64>) {
        self.reset();

        match seed {
            Some(seed) => self.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => self.shuffle(&mut rand::rng()),
        }
    }

    /// Deals a card from the top of the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns an iterator over the cards left in the deck, top card first.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Calls the `f` closure with `n` random k-cards hands.
    ///
    /// Panics if k is greater than the number of cards in the deck.
    pub fn sample<R, F>(&self, rng: &mut R, n: usize, k: usize, mut f: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&[Card]),
    {
        assert!(k <= self.cards.len(), "k <= {}", self.cards.len());

        let cards = self.cards.iter().copied().collect::<Vec<_>>();
        let mut hand = Vec::with_capacity(k);
        for _ in 0..n {
            hand.clear();
            hand.extend(cards.choose_multiple(rng, k).copied());
            f(&hand);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut deck = Self {
            cards: VecDeque::with_capacity(Self::SIZE),
        };
        deck.reset();
        deck
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::collections::vec_deque::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
