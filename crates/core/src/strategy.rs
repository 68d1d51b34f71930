// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player decision types.
//!
//! The engine asks a [Strategy] for a decision every time a player has to act,
//! the request carries the price to call, the minimum raise and the actions
//! the player can legally choose.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    poker::{Chips, PlayerId},
};

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionChoice {
    /// Leave the hand.
    Fold,
    /// Check or call the current price.
    Call,
    /// Raise by twice the minimum raise, or go all in if short.
    Raise,
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionChoice::Fold => "fold",
            ActionChoice::Call => "call",
            ActionChoice::Raise => "raise",
        };

        f.write_str(s)
    }
}

impl FromStr for ActionChoice {
    type Err = Error;

    /// Parses `F`, `C`, `R` or the full action name, `check` is a call.
    fn from_str(s: &str) -> Result<Self> {
        let choice = match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fold" => ActionChoice::Fold,
            "c" | "call" | "check" => ActionChoice::Call,
            "r" | "raise" => ActionChoice::Raise,
            _ => return Err(Error::InvalidAction(s.to_string())),
        };

        Ok(choice)
    }
}

/// A request for a player decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The player that should act.
    pub player_id: PlayerId,
    /// The street bet to match.
    pub price_to_call: Chips,
    /// The minimum raise.
    pub min_raise: Chips,
    /// The player chips.
    pub chips: Chips,
    /// The player bet in this street.
    pub bet: Chips,
    /// The legal choices.
    pub actions: Vec<ActionChoice>,
}

impl ActionRequest {
    /// Checks if a choice is legal for this request.
    pub fn is_legal(&self, choice: ActionChoice) -> bool {
        self.actions.contains(&choice)
    }

    /// Checks if the player has to put chips in to stay in the hand.
    pub fn must_call(&self) -> bool {
        self.price_to_call > self.bet
    }
}

/// A player decision capability.
pub trait Strategy: Send {
    /// Returns the player decision for a request.
    fn decide(&mut self, req: &ActionRequest) -> Result<ActionChoice>;
}

impl<F> Strategy for F
where
    F: FnMut(&ActionRequest) -> Result<ActionChoice> + Send,
{
    fn decide(&mut self, req: &ActionRequest) -> Result<ActionChoice> {
        self(req)
    }
}
