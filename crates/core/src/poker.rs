// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker game.
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops, str::FromStr};

pub use holdem_cards::{Card, Deck, Rank, Suit};
pub use holdem_eval::{Hand, HandRank};

use crate::error::Error;

/// A player identifier, the player name is unique at a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The player name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl TryFrom<i64> for Chips {
    type Error = Error;

    fn try_from(val: i64) -> Result<Self, Self::Error> {
        if val < 0 {
            return Err(Error::NegativeChips(val));
        }

        u32::try_from(val)
            .map(Chips)
            .map_err(|_| Error::ChipsOverflow(val))
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl ops::Mul<u32> for Chips {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % rhs)
    }
}

impl iter::Sum for Chips {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl<'a> iter::Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 10_000_000 {
            write!(f, "{:.1}M", amount as f64 / 1e6)
        } else if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}

/// The player state in a hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// The player is in the hand and can act.
    #[default]
    Playing,
    /// The player folded.
    Folded,
    /// The player has all its chips in the pot.
    AllIn,
    /// The player has no chips left.
    Broke,
}

impl PlayerState {
    /// The state label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerState::Playing => "playing",
            PlayerState::Folded => "folded",
            PlayerState::AllIn => "all in",
            PlayerState::Broke => "broke",
        }
    }

    /// Checks if the player can still win chips in this hand.
    pub fn in_hand(&self) -> bool {
        matches!(self, PlayerState::Playing | PlayerState::AllIn)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s.trim().to_ascii_lowercase().as_str() {
            "playing" => PlayerState::Playing,
            "folded" => PlayerState::Folded,
            "all in" | "all-in" => PlayerState::AllIn,
            "broke" => PlayerState::Broke,
            _ => return Err(Error::InvalidPlayerState(s.to_string())),
        };

        Ok(state)
    }
}

/// A betting street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before the flop.
    Preflop,
    /// Three board cards.
    Flop,
    /// Fourth board card.
    Turn,
    /// Fifth board card.
    River,
}

impl Street {
    /// All the streets in play order.
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// The street name.
    pub fn name(&self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Player action as recorded in the hand history.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player checks.
    Check,
    /// Player calls.
    Call,
    /// Player raises.
    Raise,
    /// Player puts all its chips in.
    AllIn,
    /// Player folds.
    Fold,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Check => "CHECK",
            PlayerAction::Call => "CALL",
            PlayerAction::Raise => "RAISE",
            PlayerAction::AllIn => "ALL IN",
            PlayerAction::Fold => "FOLD",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
