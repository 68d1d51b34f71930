// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A table shared between threads.
use parking_lot::Mutex;
use std::sync::Arc;

use holdem_core::{
    Error, Result,
    message::PlayerUpdate,
    poker::{Chips, PlayerId},
};

pub mod game;
pub mod player;
pub mod pots;

use game::{Game, Payoff, TableConfig};
use player::Player;

/// Table state shared by the game thread and the players that join or leave.
///
/// Seating changes and hands lock the same game, a player that joins while a
/// hand is being played waits for the hand to end.
#[derive(Clone)]
pub struct Table {
    game: Arc<Mutex<Game>>,
}

impl Table {
    /// Creates a new table.
    pub fn new(config: TableConfig) -> Self {
        Self::with_game(Game::new(config))
    }

    /// Creates a table for a game.
    pub fn with_game(game: Game) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// A player joins this table.
    ///
    /// Returns error if the table is full or the player has already joined.
    pub fn add_player(&self, player: Player) -> Result<()> {
        self.game.lock().add_player(player)
    }

    /// A player joins this table if no hand is being played.
    pub fn try_add_player(&self, player: Player) -> Result<()> {
        let mut game = self.game.try_lock().ok_or(Error::HandInProgress)?;
        game.add_player(player)
    }

    /// A player leaves this table.
    pub fn remove_player(&self, player_id: &PlayerId) -> Result<Player> {
        self.game.lock().remove_player(player_id)
    }

    /// Plays a hand, the table is locked until the hand ends.
    ///
    /// A hand that fails, for example when a remote player disconnects, is
    /// aborted and the players get their bets back.
    pub fn play_hand(&self) -> Result<Vec<Payoff>> {
        self.game.lock().play_hand()
    }

    /// The players snapshots in seat order.
    pub fn players(&self) -> Vec<PlayerUpdate> {
        self.game
            .lock()
            .players()
            .iter()
            .map(Player::snapshot)
            .collect()
    }

    /// The chips of each player in seat order.
    pub fn chips(&self) -> Vec<(PlayerId, Chips)> {
        self.game
            .lock()
            .players()
            .iter()
            .map(|p| (p.player_id.clone(), p.chips))
            .collect()
    }

    /// Number of players with chips.
    pub fn count_with_chips(&self) -> usize {
        self.game.lock().count_with_chips()
    }
}
