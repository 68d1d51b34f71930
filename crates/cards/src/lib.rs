// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.cmp_rank(&kd).is_gt());
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and sampling cards in the deck.
//!
//! A deck shuffled with the same seed always deals the same cards:
//!
//! ```
//! # use holdem_cards::Deck;
//! let mut d1 = Deck::default();
//! d1.reset_and_shuffle(Some(42));
//!
//! let mut d2 = Deck::default();
//! d2.reset_and_shuffle(Some(42));
//!
//! assert_eq!(d1.deal(), d2.deal());
//! ```
//!
//! to sample 10 random 5-cards hands:
//!
//! ```
//! # use holdem_cards::Deck;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let mut counter = 0;
//! let mut rng = StdRng::seed_from_u64(7);
//! Deck::default().sample(&mut rng, 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, Deck, Rank, Suit};
