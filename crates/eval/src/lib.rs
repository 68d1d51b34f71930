// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator checks each
//! hand category from the strongest to the weakest and returns the first one
//! that can be built out of the given cards, together with the five cards that
//! make the hand.
//!
//! To use the evaluator create a hand and use [Hand::eval] to get its rank:
//!
//! ```
//! # use holdem_eval::*;
//! // 2D, 3D, .., JD
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let h1 = Hand::eval(&cards[0..5]).unwrap();
//! let h2 = Hand::eval(&cards[5..]).unwrap();
//! assert_eq!(h1.rank(), HandRank::StraightFlush);
//! assert!(h2 > h1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, Hand, HandRank, checks, evaluate};

// Reexport cards types.
pub use holdem_cards::{Card, CardError, Deck, Rank, Suit};
