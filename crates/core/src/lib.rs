// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem Poker core types shared by the table engine and the players.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod message;
pub mod poker;
pub mod strategy;

pub use error::{Error, ErrorKind, Result};
