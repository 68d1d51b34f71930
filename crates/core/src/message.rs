// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game events sent to observers.
//!
//! The engine sends a [Message] to its [MessageSink] for every action and
//! street and a [PlayerUpdate] snapshot whenever a player state changes.
use log::info;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::mpsc};

use crate::poker::{Card, Chips, Hand, PlayerAction, PlayerId, PlayerState, Street};

/// A game event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// A new hand is starting.
    StartHand {
        /// The player with the button.
        button: PlayerId,
        /// The small blind.
        small_blind: Chips,
        /// The big blind.
        big_blind: Chips,
    },
    /// A new betting street.
    Street {
        /// The street.
        street: Street,
        /// The board cards.
        board: Vec<Card>,
        /// The pot at the start of the street.
        pot: Chips,
    },
    /// A player action.
    Action {
        /// The player that acted.
        player_id: PlayerId,
        /// The action.
        action: PlayerAction,
        /// The player total bet in this street.
        bet: Chips,
        /// The pot after the action.
        pot: Chips,
    },
    /// A player state snapshot.
    PlayerUpdate(PlayerUpdate),
    /// A player shows its hand.
    Showdown {
        /// The player id.
        player_id: PlayerId,
        /// The best hand.
        hand: Hand,
    },
    /// A player wins chips.
    Payoff {
        /// The player id.
        player_id: PlayerId,
        /// The chips won.
        chips: Chips,
    },
    /// The hand is over.
    EndHand,
}

/// A player state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    /// The player id.
    pub player_id: PlayerId,
    /// The player chips.
    pub chips: Chips,
    /// The player cards.
    pub cards: Vec<Card>,
    /// The player state.
    pub state: PlayerState,
}

struct CardList<'a>(&'a [Card]);

impl fmt::Display for CardList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, card) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for PlayerUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chips {} cards {} {}",
            self.player_id,
            self.chips,
            CardList(&self.cards),
            self.state
        )
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::StartHand {
                button,
                small_blind,
                big_blind,
            } => write!(f, "start hand button {button} blinds {small_blind}/{big_blind}"),
            Message::Street { street, board, pot } => {
                write!(f, "{street} {} pot {pot}", CardList(board))
            }
            Message::Action {
                player_id,
                action,
                bet,
                pot,
            } => write!(f, "{player_id} {action} {bet} pot {pot}"),
            Message::PlayerUpdate(update) => write!(f, "{update}"),
            Message::Showdown { player_id, hand } => write!(f, "{player_id} shows {hand}"),
            Message::Payoff { player_id, chips } => write!(f, "{player_id} wins {chips}"),
            Message::EndHand => f.write_str("end hand"),
        }
    }
}

/// A game events observer.
pub trait MessageSink: Send {
    /// Handles a game event.
    fn send(&mut self, msg: &Message);
}

impl<F> MessageSink for F
where
    F: FnMut(&Message) + Send,
{
    fn send(&mut self, msg: &Message) {
        self(msg)
    }
}

impl MessageSink for Vec<Message> {
    fn send(&mut self, msg: &Message) {
        self.push(msg.clone());
    }
}

impl MessageSink for mpsc::Sender<Message> {
    fn send(&mut self, msg: &Message) {
        // The receiver may have gone away.
        let _ = mpsc::Sender::send(self, msg.clone());
    }
}

/// A sink that writes every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn send(&mut self, msg: &Message) {
        info!("{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_display() {
        let msg = Message::Action {
            player_id: PlayerId::new("Alice"),
            action: PlayerAction::AllIn,
            bet: Chips::new(20),
            pot: Chips::new(85),
        };
        assert_eq!(msg.to_string(), "Alice ALL IN 20 pot 85");

        let msg = Message::Street {
            street: Street::Flop,
            board: vec!["KC".parse().unwrap(), "8S".parse().unwrap()],
            pot: Chips::new(34),
        };
        assert_eq!(msg.to_string(), "flop [KC 8S] pot 34");

        let msg = Message::PlayerUpdate(PlayerUpdate {
            player_id: PlayerId::new("Bob"),
            chips: Chips::new(1_500),
            cards: vec![],
            state: PlayerState::Folded,
        });
        assert_eq!(msg.to_string(), "Bob chips 1,500 cards [] folded");
    }

    #[test]
    fn sinks() {
        let mut messages: Vec<Message> = Vec::new();
        MessageSink::send(&mut messages, &Message::EndHand);
        assert_eq!(messages, vec![Message::EndHand]);

        let mut count = 0;
        let mut counter = |_: &Message| count += 1;
        counter.send(&Message::EndHand);
        counter.send(&Message::EndHand);
        assert_eq!(count, 2);

        let (tx, rx) = mpsc::channel::<Message>();
        let mut tx: Box<dyn MessageSink> = Box::new(tx);
        tx.send(&Message::EndHand);
        assert_eq!(rx.recv(), Ok(Message::EndHand));

        LogSink.send(&Message::EndHand);
    }
}
