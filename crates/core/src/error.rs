// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use holdem_cards::CardError;
use holdem_eval::EvalError;

use crate::{
    poker::{Chips, PlayerId},
    strategy::ActionChoice,
};

/// Result type for game operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A bookkeeping bug, the hand or the table should be aborted.
    Invariant,
    /// Invalid input when building a value.
    Construction,
    /// The caller used an operation out of order or with an illegal action.
    Protocol,
}

/// Game errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Card or deck error.
    #[error(transparent)]
    Card(#[from] CardError),
    /// Hand evaluation error.
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// Chips amounts cannot be negative.
    #[error("negative chips amount {0}")]
    NegativeChips(i64),
    /// Chips amount doesn't fit the chips type.
    #[error("chips amount {0} is too large")]
    ChipsOverflow(i64),
    /// Unknown player state.
    #[error("invalid player state {0:?}")]
    InvalidPlayerState(String),
    /// Unknown action.
    #[error("invalid action {0:?}")]
    InvalidAction(String),
    /// The player is not playing or has no chips.
    #[error("player {0} cannot bet")]
    CannotBet(PlayerId),
    /// The action is not in the legal set.
    #[error("illegal action {action} for player {player_id}")]
    IllegalAction {
        /// The player that chose the action.
        player_id: PlayerId,
        /// The illegal action.
        action: ActionChoice,
    },
    /// An action request is already outstanding.
    #[error("player {0} has an action pending")]
    ActionPending(PlayerId),
    /// An action was submitted but none was requested.
    #[error("no action pending for player {0}")]
    NoPendingAction(PlayerId),
    /// The remote player went away.
    #[error("player {0} disconnected")]
    Disconnected(PlayerId),
    /// The pot was not settled by the previous hand.
    #[error("pot is {0} at the start of a hand")]
    NonZeroPot(Chips),
    /// The board is full.
    #[error("too many community cards")]
    TooManyCommunityCards,
    /// The deck ran out of cards.
    #[error("the deck is empty")]
    EmptyDeck,
    /// A pot has no winner or the payoffs don't match the pot.
    #[error("no winner for pot of {0}")]
    NoPotWinner(Chips),
    /// A hand needs at least two players with chips.
    #[error("not enough players to start a hand")]
    NotEnoughPlayers,
    /// A player with the same id is already seated.
    #[error("player {0} is already seated")]
    DuplicatePlayer(PlayerId),
    /// All seats are taken.
    #[error("the table is full")]
    TableFull,
    /// The player is not seated at the table.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    /// The table is playing a hand.
    #[error("a hand is in progress")]
    HandInProgress,
}

impl Error {
    /// Returns the error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Eval(EvalError::InvalidHandSize(_))
            | Error::Card(_)
            | Error::NegativeChips(_)
            | Error::ChipsOverflow(_)
            | Error::InvalidPlayerState(_)
            | Error::InvalidAction(_)
            | Error::DuplicatePlayer(_)
            | Error::TableFull => ErrorKind::Construction,
            Error::Eval(_)
            | Error::NonZeroPot(_)
            | Error::TooManyCommunityCards
            | Error::EmptyDeck
            | Error::NoPotWinner(_) => ErrorKind::Invariant,
            Error::CannotBet(_)
            | Error::IllegalAction { .. }
            | Error::ActionPending(_)
            | Error::NoPendingAction(_)
            | Error::Disconnected(_)
            | Error::NotEnoughPlayers
            | Error::PlayerNotFound(_)
            | Error::HandInProgress => ErrorKind::Protocol,
        }
    }
}
