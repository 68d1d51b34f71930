// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Players whose decisions come from another thread.
//!
//! A [RemotePlayer] is the strategy seated at the table, when the game asks
//! for a decision it publishes the request through a notify callback and
//! blocks until the [RemoteHandle] submits an action or is closed.
use log::debug;
use parking_lot::{Condvar, Mutex};
use std::{fmt, sync::Arc};

use holdem_core::{
    Error, Result,
    poker::PlayerId,
    strategy::{ActionChoice, ActionRequest, Strategy},
};

type Notify = Box<dyn FnMut(&ActionRequest) + Send>;

#[derive(Default)]
struct Slot {
    pending: Option<ActionRequest>,
    response: Option<ActionChoice>,
    closed: bool,
}

struct Bridge {
    player_id: PlayerId,
    slot: Mutex<Slot>,
    ready: Condvar,
    notify: Mutex<Notify>,
}

/// Creates a remote player and the handle used to answer its requests.
///
/// The `notify` callback is called on the game thread each time the player
/// has to act, it must not block waiting for the answer.
pub fn remote_player<F>(player_id: impl Into<PlayerId>, notify: F) -> (RemotePlayer, RemoteHandle)
where
    F: FnMut(&ActionRequest) + Send + 'static,
{
    let bridge = Arc::new(Bridge {
        player_id: player_id.into(),
        slot: Mutex::new(Slot::default()),
        ready: Condvar::new(),
        notify: Mutex::new(Box::new(notify)),
    });

    let player = RemotePlayer {
        bridge: bridge.clone(),
    };

    (player, RemoteHandle { bridge })
}

/// A strategy that waits for a remote decision.
#[derive(Clone)]
pub struct RemotePlayer {
    bridge: Arc<Bridge>,
}

impl fmt::Debug for RemotePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemotePlayer")
            .field("player_id", &self.bridge.player_id)
            .finish_non_exhaustive()
    }
}

impl Strategy for RemotePlayer {
    fn decide(&mut self, req: &ActionRequest) -> Result<ActionChoice> {
        let bridge = &self.bridge;

        {
            let mut slot = bridge.slot.lock();
            if slot.closed {
                return Err(Error::Disconnected(bridge.player_id.clone()));
            }

            if slot.pending.is_some() {
                return Err(Error::ActionPending(bridge.player_id.clone()));
            }

            slot.pending = Some(req.clone());
            slot.response = None;
        }

        debug!(
            "Player {} action request price {} min raise {}",
            bridge.player_id, req.price_to_call, req.min_raise
        );

        // The slot is unlocked so that the callback can submit an action.
        {
            let mut notify = bridge.notify.lock();
            (*notify)(req);
        }

        let mut slot = bridge.slot.lock();
        loop {
            if let Some(choice) = slot.response.take() {
                slot.pending = None;
                return Ok(choice);
            }

            if slot.closed {
                slot.pending = None;
                return Err(Error::Disconnected(bridge.player_id.clone()));
            }

            bridge.ready.wait(&mut slot);
        }
    }
}

/// The handle used to answer a remote player requests.
#[derive(Clone)]
pub struct RemoteHandle {
    bridge: Arc<Bridge>,
}

impl fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("player_id", &self.bridge.player_id)
            .finish_non_exhaustive()
    }
}

impl RemoteHandle {
    /// The remote player id.
    pub fn player_id(&self) -> &PlayerId {
        &self.bridge.player_id
    }

    /// The request waiting for an answer if any.
    pub fn pending(&self) -> Option<ActionRequest> {
        self.bridge.slot.lock().pending.clone()
    }

    /// Parses and submits an action for the pending request.
    pub fn submit(&self, action: &str) -> Result<()> {
        let choice = action.parse::<ActionChoice>()?;
        self.submit_choice(choice)
    }

    /// Submits an action for the pending request.
    ///
    /// An illegal action is rejected and the request stays pending.
    pub fn submit_choice(&self, choice: ActionChoice) -> Result<()> {
        let bridge = &self.bridge;
        let mut slot = bridge.slot.lock();

        if slot.closed {
            return Err(Error::Disconnected(bridge.player_id.clone()));
        }

        let Some(req) = slot.pending.as_ref() else {
            return Err(Error::NoPendingAction(bridge.player_id.clone()));
        };

        if slot.response.is_some() {
            return Err(Error::ActionPending(bridge.player_id.clone()));
        }

        if !req.is_legal(choice) {
            return Err(Error::IllegalAction {
                player_id: bridge.player_id.clone(),
                action: choice,
            });
        }

        slot.response = Some(choice);
        bridge.ready.notify_all();
        Ok(())
    }

    /// Disconnects the player, a waiting request fails.
    pub fn close(&self) {
        let mut slot = self.bridge.slot.lock();
        slot.closed = true;
        self.bridge.ready.notify_all();
    }

    /// Checks if the player has been disconnected.
    pub fn is_closed(&self) -> bool {
        self.bridge.slot.lock().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Table, TableConfig};
    use holdem_bot::CallingStation;
    use holdem_core::poker::Chips;
    use std::{sync::mpsc, thread, time::Duration};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn request() -> ActionRequest {
        ActionRequest {
            player_id: PlayerId::new("Alice"),
            price_to_call: Chips::new(2),
            min_raise: Chips::new(2),
            chips: Chips::new(1),
            bet: Chips::ZERO,
            actions: vec![ActionChoice::Fold, ActionChoice::Call],
        }
    }

    fn channel_player() -> (RemotePlayer, RemoteHandle, mpsc::Receiver<ActionRequest>) {
        let (tx, rx) = mpsc::channel();
        let (player, handle) = remote_player("Alice", move |req: &ActionRequest| {
            let _ = tx.send(req.clone());
        });
        (player, handle, rx)
    }

    #[test]
    fn decide_and_submit() {
        let (mut player, handle, rx) = channel_player();
        assert_eq!(
            handle.submit("call"),
            Err(Error::NoPendingAction(PlayerId::new("Alice")))
        );

        let engine = thread::spawn(move || player.decide(&request()));

        let req = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(req, request());
        assert_eq!(handle.pending(), Some(request()));

        assert_eq!(handle.submit("X"), Err(Error::InvalidAction("X".to_string())));
        assert_eq!(
            handle.submit("raise"),
            Err(Error::IllegalAction {
                player_id: PlayerId::new("Alice"),
                action: ActionChoice::Raise
            })
        );

        // Still waiting after an illegal action.
        assert!(handle.pending().is_some());
        assert!(!engine.is_finished());

        handle.submit("c").unwrap();
        assert_eq!(engine.join().unwrap(), Ok(ActionChoice::Call));

        assert_eq!(handle.pending(), None);
        assert_eq!(
            handle.submit("c"),
            Err(Error::NoPendingAction(PlayerId::new("Alice")))
        );
    }

    #[test]
    fn one_request_at_a_time() {
        let (player, handle, rx) = channel_player();

        let mut waiting = player.clone();
        let engine = thread::spawn(move || waiting.decide(&request()));
        rx.recv_timeout(TIMEOUT).unwrap();

        let mut other = player;
        assert_eq!(
            other.decide(&request()),
            Err(Error::ActionPending(PlayerId::new("Alice")))
        );

        handle.close();
        assert!(handle.is_closed());
        assert_eq!(
            engine.join().unwrap(),
            Err(Error::Disconnected(PlayerId::new("Alice")))
        );

        assert_eq!(
            handle.submit("f"),
            Err(Error::Disconnected(PlayerId::new("Alice")))
        );
        assert_eq!(
            other.decide(&request()),
            Err(Error::Disconnected(PlayerId::new("Alice")))
        );
    }

    #[test]
    fn remote_player_at_table() {
        let table = Table::new(TableConfig {
            seed: Some(3),
            ..TableConfig::default()
        });

        let (alice, handle, rx) = channel_player();
        table
            .add_player(Player::new("Alice", Chips::new(100), alice))
            .unwrap();
        table
            .add_player(Player::new("Bob", Chips::new(100), CallingStation))
            .unwrap();

        let game_table = table.clone();
        let game = thread::spawn(move || game_table.play_hand());

        let mut requests = 0;
        while !game.is_finished() {
            let Ok(req) = rx.recv_timeout(Duration::from_millis(20)) else {
                continue;
            };

            requests += 1;
            assert_eq!(req.player_id, PlayerId::new("Alice"));

            // The table is locked while the hand is played.
            let cyril = Player::new("Cyril", Chips::new(100), CallingStation);
            assert_eq!(table.try_add_player(cyril), Err(Error::HandInProgress));

            handle.submit("call").unwrap();
        }

        let payoffs = game.join().unwrap().unwrap();
        assert!(requests > 0);
        assert!(!payoffs.is_empty());

        let total = table.chips().iter().map(|(_, c)| *c).sum::<Chips>();
        assert_eq!(total, Chips::new(200));

        let cyril = Player::new("Cyril", Chips::new(100), CallingStation);
        table.try_add_player(cyril).unwrap();
    }

    #[test]
    fn disconnect_during_hand() {
        let table = Table::new(TableConfig {
            seed: Some(5),
            ..TableConfig::default()
        });

        let (alice, handle, rx) = channel_player();
        table
            .add_player(Player::new("Alice", Chips::new(100), alice))
            .unwrap();
        table
            .add_player(Player::new("Bob", Chips::new(100), CallingStation))
            .unwrap();
        table
            .add_player(Player::new("Cyril", Chips::new(100), CallingStation))
            .unwrap();

        let game_table = table.clone();
        let game = thread::spawn(move || game_table.play_hand());

        rx.recv_timeout(TIMEOUT).unwrap();
        handle.close();

        assert_eq!(
            game.join().unwrap(),
            Err(Error::Disconnected(PlayerId::new("Alice")))
        );

        // The bets are returned and the table is open again.
        let alice = table.remove_player(&PlayerId::new("Alice")).unwrap();
        assert_eq!(alice.chips, Chips::new(100));

        let total = table.chips().iter().map(|(_, c)| *c).sum::<Chips>();
        assert_eq!(total, Chips::new(200));

        let dave = Player::new("Dave", Chips::new(100), CallingStation);
        table.try_add_player(dave).unwrap();

        table.play_hand().unwrap();
        let total = table.chips().iter().map(|(_, c)| *c).sum::<Chips>();
        assert_eq!(total, Chips::new(300));
    }
}
