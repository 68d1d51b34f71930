// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem Poker bot strategies.
//!
//! A [ScriptedStrategy] plays a fixed sequence of actions and then picks
//! random legal actions, useful for replaying hands in tests and for
//! simulations:
//!
//! ```
//! # use holdem_bot::{ScriptedStrategy, core::{poker::*, strategy::*}};
//! let mut bot = ScriptedStrategy::with_seed("RC", 7).unwrap();
//! let req = ActionRequest {
//!     player_id: PlayerId::new("Alice"),
//!     price_to_call: Chips::new(2),
//!     min_raise: Chips::new(2),
//!     chips: Chips::new(20),
//!     bet: Chips::ZERO,
//!     actions: vec![ActionChoice::Fold, ActionChoice::Call, ActionChoice::Raise],
//! };
//!
//! assert_eq!(bot.decide(&req).unwrap(), ActionChoice::Raise);
//! assert_eq!(bot.decide(&req).unwrap(), ActionChoice::Call);
//! assert!(req.is_legal(bot.decide(&req).unwrap()));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod scripted;
pub use scripted::{CallingStation, ScriptedStrategy};

pub use holdem_core as core;
