// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator runs the category checks in [checks] from the strongest
//! category to the weakest, the first check that builds a 5 cards hand is the
//! best hand, as each check fails for hands that contain a stronger category.
//!
//! A [Hand] keeps the category and the five cards in tie-break order so that
//! hands can be compared with the standard ordering operators.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use holdem_cards::Card;

pub mod checks;

/// Evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Hands must have between 5 and 7 cards.
    #[error("invalid hand size {0}, expected 5 to 7 cards")]
    InvalidHandSize(usize),
    /// No category matched, the high card check matches any valid hand.
    #[error("no ranking matched for {0:?}")]
    NoRankingMatched(Vec<Card>),
    /// A category check returned a partial hand.
    #[error("{rank} check returned {len} cards")]
    InvalidCategorySize {
        /// The category that failed.
        rank: HandRank,
        /// Number of cards returned by the check.
        len: usize,
    },
}

/// A hand category, ordered from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// All categories in evaluation order.
    pub const STRONGEST_FIRST: [HandRank; 10] = [
        HandRank::RoyalFlush,
        HandRank::StraightFlush,
        HandRank::FourOfAKind,
        HandRank::FullHouse,
        HandRank::Flush,
        HandRank::Straight,
        HandRank::ThreeOfAKind,
        HandRank::TwoPair,
        HandRank::OnePair,
        HandRank::HighCard,
    ];

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "HIGH CARD",
            HandRank::OnePair => "ONE PAIR",
            HandRank::TwoPair => "TWO PAIR",
            HandRank::ThreeOfAKind => "THREE OF A KIND",
            HandRank::Straight => "STRAIGHT",
            HandRank::Flush => "FLUSH",
            HandRank::FullHouse => "FULL HOUSE",
            HandRank::FourOfAKind => "FOUR OF A KIND",
            HandRank::StraightFlush => "STRAIGHT FLUSH",
            HandRank::RoyalFlush => "ROYAL FLUSH",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The best 5 cards hand out of 5 to 7 cards.
///
/// Hands compare by category and then by the cards ranks in order, suits are
/// ignored so two hands with the same ranks are equal and split the pot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hand {
    rank: HandRank,
    cards: [Card; 5],
}

impl Hand {
    /// Evaluates the best hand for the given cards.
    pub fn eval(cards: &[Card]) -> Result<Hand, EvalError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EvalError::InvalidHandSize(cards.len()));
        }

        for rank in HandRank::STRONGEST_FIRST {
            let best = checks::check(rank, cards);
            match best.len() {
                0 => continue,
                5 => {
                    let cards = best
                        .try_into()
                        .map_err(|v: Vec<Card>| EvalError::InvalidCategorySize {
                            rank,
                            len: v.len(),
                        })?;
                    return Ok(Hand { rank, cards });
                }
                len => return Err(EvalError::InvalidCategorySize { rank, len }),
            }
        }

        Err(EvalError::NoRankingMatched(cards.to_vec()))
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The hand cards in tie-break order.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }
}

/// Evaluates the best hand for the given cards, same as [Hand::eval].
pub fn evaluate(cards: &[Card]) -> Result<Hand, EvalError> {
    Hand::eval(cards)
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hand {}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| {
            let lhs = self.cards.iter().map(Card::rank);
            let rhs = other.cards.iter().map(Card::rank);
            lhs.cmp(rhs)
        })
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.cards {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}
