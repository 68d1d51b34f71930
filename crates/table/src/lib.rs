// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem Poker table engine.
//!
//! A [Game] plays hands between seated [Player]s, each player acts through a
//! [Strategy](holdem_core::strategy::Strategy) that can be a bot or a
//! [RemotePlayer] waiting for a human decision. A [Table] shares a game
//! between threads so that players can join and leave between hands.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod remote;
pub use remote::{RemoteHandle, RemotePlayer, remote_player};

pub mod table;
pub use table::{
    Table,
    game::{BetEntry, Game, HandState, Payoff, TableConfig},
    player::{Bet, Player},
    pots::Pot,
};

pub use holdem_core as core;
