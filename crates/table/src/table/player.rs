// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use std::fmt;

use holdem_core::{
    Error, Result,
    message::PlayerUpdate,
    poker::{Card, Chips, PlayerId, PlayerState},
    strategy::{ActionChoice, ActionRequest, Strategy},
};

/// The outcome of a player bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bet {
    /// The player total bet in this street.
    pub total: Chips,
    /// The raise over the price to call, zero for checks, calls and folds.
    pub raise: Chips,
}

/// A table player state.
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// This player chips.
    pub chips: Chips,
    /// This player hole cards.
    pub cards: Vec<Card>,
    /// The player bet in this street.
    pub bet: Chips,
    /// The player state in the hand.
    pub state: PlayerState,
    strategy: Box<dyn Strategy>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("player_id", &self.player_id)
            .field("chips", &self.chips)
            .field("cards", &self.cards)
            .field("bet", &self.bet)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Player {
    /// Creates a new player.
    pub fn new<S>(player_id: impl Into<PlayerId>, chips: Chips, strategy: S) -> Self
    where
        S: Strategy + 'static,
    {
        Self::with_strategy(player_id, chips, Box::new(strategy))
    }

    /// Creates a new player with a boxed strategy.
    pub fn with_strategy(
        player_id: impl Into<PlayerId>,
        chips: Chips,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            chips,
            cards: Vec::with_capacity(2),
            bet: Chips::ZERO,
            state: PlayerState::Playing,
            strategy,
        }
    }

    /// Reset state for a new hand.
    pub fn start_hand(&mut self) {
        self.state = if self.chips == Chips::ZERO {
            PlayerState::Broke
        } else {
            PlayerState::Playing
        };

        self.cards.clear();
        self.bet = Chips::ZERO;
    }

    /// Reset state for a new street.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
    }

    /// Deals a hole card to this player.
    pub fn deal(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Pays a blind, a player short of chips goes all in.
    ///
    /// Returns the amount paid.
    pub fn pay_blind(&mut self, blind: Chips) -> Result<Chips> {
        if self.state == PlayerState::Broke {
            return Err(Error::CannotBet(self.player_id.clone()));
        }

        let paid = if self.chips > blind {
            self.state = PlayerState::Playing;
            blind
        } else {
            self.state = PlayerState::AllIn;
            self.chips
        };

        self.chips -= paid;
        self.bet += paid;
        Ok(paid)
    }

    /// Asks the player strategy for a decision and applies it.
    ///
    /// Fails if the player cannot act or the strategy returns an action that is
    /// not legal for the request.
    pub fn bet(&mut self, price_to_call: Chips, min_raise: Chips) -> Result<Bet> {
        if self.state != PlayerState::Playing || self.chips == Chips::ZERO {
            return Err(Error::CannotBet(self.player_id.clone()));
        }

        let req = self.action_request(price_to_call, min_raise);
        let choice = self.strategy.decide(&req)?;
        if !req.is_legal(choice) {
            return Err(Error::IllegalAction {
                player_id: self.player_id.clone(),
                action: choice,
            });
        }

        let bet = match choice {
            ActionChoice::Fold => self.fold(),
            ActionChoice::Call => self.call(price_to_call),
            ActionChoice::Raise => self.raise(price_to_call, min_raise),
        };

        Ok(bet)
    }

    /// Adds chips won to this player.
    pub fn win(&mut self, chips: Chips) {
        self.chips += chips;
    }

    /// Returns a snapshot of this player state.
    pub fn snapshot(&self) -> PlayerUpdate {
        PlayerUpdate {
            player_id: self.player_id.clone(),
            chips: self.chips,
            cards: self.cards.clone(),
            state: self.state,
        }
    }

    fn action_request(&self, price_to_call: Chips, min_raise: Chips) -> ActionRequest {
        let mut actions = vec![ActionChoice::Fold, ActionChoice::Call];
        if self.chips + self.bet > price_to_call {
            actions.push(ActionChoice::Raise);
        }

        ActionRequest {
            player_id: self.player_id.clone(),
            price_to_call,
            min_raise,
            chips: self.chips,
            bet: self.bet,
            actions,
        }
    }

    fn call(&mut self, price_to_call: Chips) -> Bet {
        if price_to_call <= self.bet {
            // Check.
        } else if self.chips + self.bet > price_to_call {
            self.chips -= price_to_call - self.bet;
            self.bet = price_to_call;
        } else {
            self.go_all_in();
        }

        Bet {
            total: self.bet,
            raise: Chips::ZERO,
        }
    }

    fn raise(&mut self, price_to_call: Chips, min_raise: Chips) -> Bet {
        let target = price_to_call + min_raise * 2;
        let raise = if self.chips + self.bet > target {
            self.chips -= target - self.bet;
            self.bet = target;
            min_raise * 2
        } else {
            let raise = self.chips + self.bet - price_to_call;
            self.go_all_in();
            raise
        };

        Bet {
            total: self.bet,
            raise,
        }
    }

    fn fold(&mut self) -> Bet {
        self.bet = Chips::ZERO;
        self.state = PlayerState::Folded;
        Bet {
            total: Chips::ZERO,
            raise: Chips::ZERO,
        }
    }

    fn go_all_in(&mut self) {
        self.bet += self.chips;
        self.chips = Chips::ZERO;
        self.state = PlayerState::AllIn;
    }
}
