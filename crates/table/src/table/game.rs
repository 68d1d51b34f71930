// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The hand engine.
use ahash::AHashMap;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::fmt;

use holdem_core::{
    Error, Result,
    message::{LogSink, Message, MessageSink},
    poker::{Card, Chips, Deck, Hand, PlayerAction, PlayerId, PlayerState, Street},
};

use super::{
    player::Player,
    pots::{self, Contribution, Pot},
};

/// The table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum number of players.
    pub seats: usize,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind, also the minimum raise.
    pub big_blind: Chips,
    /// Seed for the deck shuffles.
    pub seed: Option<u64>,
    /// Shuffle the deck at the start of each hand.
    pub shuffle: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: 10,
            small_blind: Chips::new(1),
            big_blind: Chips::new(2),
            seed: None,
            shuffle: true,
        }
    }
}

/// The hand state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandState {
    /// No hand has been played yet.
    #[default]
    Idle,
    /// Blinds, hole cards and preflop betting.
    Preflop,
    /// Flop betting.
    Flop,
    /// Turn betting.
    Turn,
    /// River betting.
    River,
    /// The hand ended with a showdown.
    Showdown,
    /// The hand ended with all but one player folded.
    EarlyWin,
    /// The hand was stopped by an error and the bets were returned.
    Aborted,
}

impl HandState {
    /// Checks if a hand is being played.
    pub fn in_progress(&self) -> bool {
        matches!(
            self,
            HandState::Preflop | HandState::Flop | HandState::Turn | HandState::River
        )
    }
}

/// An action log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetEntry {
    /// The player that acted.
    pub player_id: PlayerId,
    /// The action.
    pub action: PlayerAction,
    /// The player total bet in the street after the action.
    pub bet: Chips,
}

impl fmt::Display for BetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.player_id, self.action, self.bet)
    }
}

/// Chips won by a player in a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payoff {
    /// The player id.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
}

/// A table game, plays hands between the seated players.
pub struct Game {
    config: TableConfig,
    hand_state: HandState,
    players: Vec<Player>,
    button: usize,
    deck: Deck,
    board: Vec<Card>,
    pot: Chips,
    street_history: Vec<BetEntry>,
    hand_history: AHashMap<Street, Vec<BetEntry>>,
    street_bets: AHashMap<PlayerId, Chips>,
    hand_bets: AHashMap<PlayerId, Chips>,
    hands: AHashMap<PlayerId, Hand>,
    payoffs: Vec<Payoff>,
    sink: Box<dyn MessageSink>,
    rng: StdRng,
}

impl Game {
    /// Creates a game that logs its events.
    pub fn new(config: TableConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let deck = if config.shuffle {
            Deck::new_and_shuffled(&mut rng)
        } else {
            Deck::default()
        };

        Self {
            config,
            hand_state: HandState::default(),
            players: Vec::default(),
            button: 0,
            deck,
            board: Vec::with_capacity(5),
            pot: Chips::ZERO,
            street_history: Vec::default(),
            hand_history: AHashMap::default(),
            street_bets: AHashMap::default(),
            hand_bets: AHashMap::default(),
            hands: AHashMap::default(),
            payoffs: Vec::default(),
            sink: Box::new(LogSink),
            rng,
        }
    }

    /// Sends the game events to the given sink.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: MessageSink + 'static,
    {
        self.set_sink(sink);
        self
    }

    /// Replaces the events sink.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: MessageSink + 'static,
    {
        self.sink = Box::new(sink);
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Seats a player at the first empty seat.
    pub fn add_player(&mut self, player: Player) -> Result<()> {
        if self.hand_state.in_progress() {
            return Err(Error::HandInProgress);
        }

        if self.players.iter().any(|p| p.player_id == player.player_id) {
            return Err(Error::DuplicatePlayer(player.player_id));
        }

        if self.players.len() >= self.config.seats {
            return Err(Error::TableFull);
        }

        info!(
            "Player {} joined with {} chips",
            player.player_id, player.chips
        );

        self.players.push(player);
        Ok(())
    }

    /// Removes a player from the table.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Result<Player> {
        if self.hand_state.in_progress() {
            return Err(Error::HandInProgress);
        }

        let pos = self
            .players
            .iter()
            .position(|p| &p.player_id == player_id)
            .ok_or_else(|| Error::PlayerNotFound(player_id.clone()))?;

        let player = self.players.remove(pos);

        // Keep the button on the same player or on the seat before the
        // removed one so that the next player gets it.
        if pos < self.button {
            self.button -= 1;
        } else if pos == self.button {
            let count = self.players.len();
            self.button = if count == 0 {
                0
            } else {
                (pos + count - 1) % count
            };
        }

        info!("Player {} left with {} chips", player.player_id, player.chips);
        Ok(player)
    }

    /// Moves the button to the given seat.
    pub fn set_button(&mut self, seat: usize) {
        if !self.players.is_empty() {
            self.button = seat % self.players.len();
        }
    }

    /// Replaces the deck, used with a stacked deck and `shuffle` off.
    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    /// Plays a hand and returns the chips won by each player.
    ///
    /// If a street fails the hand is aborted and the error returned, the
    /// table can then seat players and play the next hand.
    pub fn play_hand(&mut self) -> Result<Vec<Payoff>> {
        self.start_hand()?;

        let early_win = match self.play_streets() {
            Ok(early_win) => early_win,
            Err(e) => {
                warn!("Hand aborted: {e}");
                self.abort_hand();
                return Err(e);
            }
        };

        for player in &self.players {
            self.sink.send(&Message::PlayerUpdate(player.snapshot()));
        }

        self.sink.send(&Message::EndHand);

        info!(
            "Hand ended {}",
            if early_win { "early" } else { "at showdown" }
        );

        Ok(self.payoffs.clone())
    }

    /// Stops the current hand and gives back the chips.
    ///
    /// Payoffs already made are taken back and each player gets its hand
    /// bets, so the stacks are the ones at the start of the hand.
    pub fn abort_hand(&mut self) {
        for payoff in std::mem::take(&mut self.payoffs) {
            if let Some(player) = self
                .players
                .iter_mut()
                .find(|p| p.player_id == payoff.player_id)
            {
                player.chips -= payoff.chips;
            }
        }

        for player in &mut self.players {
            if let Some(bet) = self.hand_bets.remove(&player.player_id) {
                player.win(bet);
            }

            player.start_hand();
        }

        self.pot = Chips::ZERO;
        self.street_bets.clear();
        self.hand_bets.clear();
        self.hands.clear();
        self.hand_state = HandState::Aborted;

        for player in &self.players {
            self.sink.send(&Message::PlayerUpdate(player.snapshot()));
        }

        self.sink.send(&Message::EndHand);
    }

    /// Starts a new hand, moves the button and resets the players.
    pub fn start_hand(&mut self) -> Result<()> {
        if self.pot != Chips::ZERO {
            return Err(Error::NonZeroPot(self.pot));
        }

        if self.count_with_chips() < 2 {
            return Err(Error::NotEnoughPlayers);
        }

        self.button = (self.button + 1) % self.players.len();

        self.board.clear();
        self.street_history.clear();
        self.hand_history.clear();
        self.street_bets.clear();
        self.hand_bets.clear();
        self.hands.clear();
        self.payoffs.clear();

        for player in &mut self.players {
            player.start_hand();
        }

        if self.config.shuffle {
            self.deck.reset();
            self.deck.shuffle(&mut self.rng);
        }

        self.hand_state = HandState::Preflop;

        let button = self.players[self.button].player_id.clone();
        info!(
            "Start hand with {} players, button {button}",
            self.count_with_chips()
        );

        self.sink.send(&Message::StartHand {
            button,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
        });

        Ok(())
    }

    /// Collects the blinds from the first two players after the button that
    /// are not broke.
    ///
    /// Returns the big blind seat.
    pub fn collect_blinds(&mut self) -> Result<usize> {
        let seats = self
            .seats_after_button()
            .filter(|&seat| self.players[seat].state != PlayerState::Broke)
            .take(2)
            .collect::<Vec<_>>();

        let &[sb_seat, bb_seat] = seats.as_slice() else {
            return Err(Error::NotEnoughPlayers);
        };

        self.post_blind(sb_seat, self.config.small_blind, PlayerAction::SmallBlind)?;
        self.post_blind(bb_seat, self.config.big_blind, PlayerAction::BigBlind)?;

        Ok(bb_seat)
    }

    /// Deals two hole cards to each player, one at a time starting left of the
    /// button.
    pub fn deal_players(&mut self) -> Result<()> {
        let seats = self
            .seats_after_button()
            .filter(|&seat| self.players[seat].state != PlayerState::Broke)
            .collect::<Vec<_>>();

        for _ in 0..2 {
            for &seat in &seats {
                let card = self.deck.deal().ok_or(Error::EmptyDeck)?;
                self.players[seat].deal(card);
            }
        }

        for &seat in &seats {
            self.sink
                .send(&Message::PlayerUpdate(self.players[seat].snapshot()));
        }

        Ok(())
    }

    /// Plays the preflop street, returns true if a player won the hand.
    pub fn preflop(&mut self) -> Result<bool> {
        self.start_street(Street::Preflop);

        let bb_seat = self.collect_blinds()?;
        self.deal_players()?;
        self.send_street(Street::Preflop);

        let first = (bb_seat + 1) % self.players.len();
        self.betting(first, self.config.big_blind)?;

        self.end_street(Street::Preflop)
    }

    /// Plays the flop street, returns true if a player won the hand.
    pub fn flop(&mut self) -> Result<bool> {
        self.board_street(Street::Flop, 3)
    }

    /// Plays the turn street, returns true if a player won the hand.
    pub fn turn(&mut self) -> Result<bool> {
        self.board_street(Street::Turn, 1)
    }

    /// Plays the river street, returns true if a player won the hand.
    pub fn river(&mut self) -> Result<bool> {
        self.board_street(Street::River, 1)
    }

    /// Pays the pot to the last player in the hand if all others folded.
    pub fn check_early_winner(&mut self) -> bool {
        let mut seats = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.state.in_hand())
            .map(|(seat, _)| seat);

        let (Some(seat), None) = (seats.next(), seats.next()) else {
            return false;
        };

        let chips = self.pot;
        self.pot = Chips::ZERO;
        self.hand_state = HandState::EarlyWin;
        self.pay(seat, chips);

        info!("Player {} wins {chips}", self.players[seat].player_id);
        true
    }

    /// Evaluates the best hand of the players still in the hand.
    pub fn determine_hands(&mut self) -> Result<()> {
        self.hands.clear();

        for player in self.players.iter().filter(|p| p.state.in_hand()) {
            let cards = player
                .cards
                .iter()
                .chain(&self.board)
                .copied()
                .collect::<Vec<_>>();
            let hand = Hand::eval(&cards)?;

            self.sink.send(&Message::Showdown {
                player_id: player.player_id.clone(),
                hand,
            });

            self.hands.insert(player.player_id.clone(), hand);
        }

        Ok(())
    }

    /// Splits this hand bets into the main pot and the side pots.
    pub fn determine_pots(&self) -> Vec<Pot> {
        let contributions = self
            .players
            .iter()
            .map(|p| Contribution {
                player_id: p.player_id.clone(),
                chips: self.hand_bets.get(&p.player_id).copied().unwrap_or_default(),
                in_hand: p.state.in_hand(),
            })
            .collect::<Vec<_>>();

        pots::split_pots(&contributions)
    }

    /// Pays each pot to the best hands among the players that can win it.
    pub fn showdown(&mut self) -> Result<()> {
        self.hand_state = HandState::Showdown;
        self.determine_hands()?;

        let order = self.seats_after_button().collect::<Vec<_>>();
        let mut paid = Chips::ZERO;

        for pot in self.determine_pots() {
            let eligible = order
                .iter()
                .filter_map(|&seat| {
                    let player_id = &self.players[seat].player_id;
                    if pot.players.contains(player_id) {
                        self.hands.get(player_id).map(|hand| (seat, *hand))
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>();

            let Some(best) = eligible.iter().map(|(_, hand)| *hand).max() else {
                return Err(Error::NoPotWinner(pot.chips));
            };

            let winners = eligible
                .iter()
                .filter(|(_, hand)| *hand == best)
                .map(|(seat, _)| *seat)
                .collect::<Vec<_>>();

            let shares = pots::split_chips(pot.chips, winners.len());
            for (seat, chips) in winners.into_iter().zip(shares) {
                self.pay(seat, chips);
                paid += chips;
            }
        }

        if paid != self.pot {
            return Err(Error::NoPotWinner(self.pot - paid));
        }

        self.pot = Chips::ZERO;
        Ok(())
    }

    /// Number of players with chips.
    pub fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.chips > Chips::ZERO)
            .count()
    }

    /// The seated players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The button seat.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The actions in the current street.
    pub fn street_history(&self) -> &[BetEntry] {
        &self.street_history
    }

    /// The actions of a completed street in this hand.
    pub fn hand_history(&self, street: Street) -> &[BetEntry] {
        self.hand_history
            .get(&street)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The players bets in the current street.
    pub fn street_bets(&self) -> &AHashMap<PlayerId, Chips> {
        &self.street_bets
    }

    /// The players bets in this hand.
    pub fn hand_bets(&self) -> &AHashMap<PlayerId, Chips> {
        &self.hand_bets
    }

    /// The hand state.
    pub fn hand_state(&self) -> HandState {
        self.hand_state
    }

    /// The players hands at showdown.
    pub fn hands(&self) -> &AHashMap<PlayerId, Hand> {
        &self.hands
    }

    /// The chips won in the last hand.
    pub fn payoffs(&self) -> &[Payoff] {
        &self.payoffs
    }

    fn play_streets(&mut self) -> Result<bool> {
        let early_win = self.preflop()? || self.flop()? || self.turn()? || self.river()?;
        if !early_win {
            self.showdown()?;
        }

        Ok(early_win)
    }

    fn seats_after_button(&self) -> impl Iterator<Item = usize> + use<> {
        let count = self.players.len();
        let button = self.button;
        (1..=count).map(move |idx| (button + idx) % count)
    }

    fn start_street(&mut self, street: Street) {
        self.hand_state = match street {
            Street::Preflop => HandState::Preflop,
            Street::Flop => HandState::Flop,
            Street::Turn => HandState::Turn,
            Street::River => HandState::River,
        };

        self.street_history.clear();
        self.street_bets.clear();

        for player in &mut self.players {
            player.start_round();
        }
    }

    fn end_street(&mut self, street: Street) -> Result<bool> {
        self.hand_history
            .insert(street, self.street_history.clone());
        Ok(self.check_early_winner())
    }

    fn board_street(&mut self, street: Street, cards: usize) -> Result<bool> {
        self.start_street(street);
        self.deal_board(cards)?;
        self.send_street(street);

        let first = (self.button + 1) % self.players.len();
        self.betting(first, Chips::ZERO)?;

        self.end_street(street)
    }

    fn deal_board(&mut self, cards: usize) -> Result<()> {
        if self.board.len() + cards > 5 {
            return Err(Error::TooManyCommunityCards);
        }

        // Burn card.
        self.deck.deal().ok_or(Error::EmptyDeck)?;

        for _ in 0..cards {
            let card = self.deck.deal().ok_or(Error::EmptyDeck)?;
            self.board.push(card);
        }

        Ok(())
    }

    fn send_street(&mut self, street: Street) {
        self.sink.send(&Message::Street {
            street,
            board: self.board.clone(),
            pot: self.pot,
        });
    }

    fn post_blind(&mut self, seat: usize, blind: Chips, action: PlayerAction) -> Result<()> {
        let paid = self.players[seat].pay_blind(blind)?;
        let player_id = self.players[seat].player_id.clone();

        self.pot += paid;
        *self.street_bets.entry(player_id.clone()).or_default() += paid;
        *self.hand_bets.entry(player_id).or_default() += paid;

        self.record_action(seat, action, paid);
        Ok(())
    }

    /// Runs a betting round starting at the `first` seat.
    fn betting(&mut self, first: usize, mut price_to_call: Chips) -> Result<()> {
        let count = self.players.len();
        let mut min_raise = self.config.big_blind;
        let mut queue = (0..count)
            .map(|idx| (first + idx) % count)
            .collect::<Vec<_>>();
        let mut next = 0;
        let mut in_hand = self.players.iter().filter(|p| p.state.in_hand()).count();

        while next < queue.len() && in_hand > 1 {
            // Stop if nobody is left to respond to a bet.
            let mut playing = self
                .players
                .iter()
                .filter(|p| p.state == PlayerState::Playing);
            match (playing.next(), playing.next()) {
                (None, _) => break,
                (Some(p), None) if p.bet >= price_to_call => break,
                _ => {}
            }

            let seat = queue[next];
            next += 1;

            if self.players[seat].state != PlayerState::Playing {
                continue;
            }

            let player_id = self.players[seat].player_id.clone();
            let prev_bet = self
                .street_bets
                .get(&player_id)
                .copied()
                .unwrap_or_default();

            let bet = self.players[seat].bet(price_to_call, min_raise)?;

            let action = match self.players[seat].state {
                PlayerState::Folded => PlayerAction::Fold,
                PlayerState::AllIn => PlayerAction::AllIn,
                _ if bet.raise > Chips::ZERO => PlayerAction::Raise,
                _ if bet.total == prev_bet => PlayerAction::Check,
                _ => PlayerAction::Call,
            };

            if action == PlayerAction::Fold {
                in_hand -= 1;
            } else {
                self.pot += bet.total - prev_bet;
                self.street_bets.insert(player_id.clone(), bet.total);
                *self.hand_bets.entry(player_id).or_default() += bet.total - prev_bet;
            }

            // A raise reopens the action for all the other players.
            if bet.raise > Chips::ZERO {
                price_to_call = bet.total;
                min_raise = min_raise.max(bet.raise);
                queue = (1..count).map(|idx| (seat + idx) % count).collect();
                next = 0;
            }

            self.record_action(seat, action, bet.total);
        }

        Ok(())
    }

    fn record_action(&mut self, seat: usize, action: PlayerAction, bet: Chips) {
        let player = &self.players[seat];

        debug!("{} {action} {bet} pot {}", player.player_id, self.pot);

        self.sink.send(&Message::Action {
            player_id: player.player_id.clone(),
            action,
            bet,
            pot: self.pot,
        });
        self.sink.send(&Message::PlayerUpdate(player.snapshot()));

        self.street_history.push(BetEntry {
            player_id: player.player_id.clone(),
            action,
            bet,
        });
    }

    fn pay(&mut self, seat: usize, chips: Chips) {
        let player = &mut self.players[seat];
        player.win(chips);

        let player_id = player.player_id.clone();
        match self.payoffs.iter_mut().find(|p| p.player_id == player_id) {
            Some(payoff) => payoff.chips += chips,
            None => self.payoffs.push(Payoff {
                player_id: player_id.clone(),
                chips,
            }),
        }

        self.sink.send(&Message::Payoff { player_id, chips });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_bot::{CallingStation, ScriptedStrategy};
    use holdem_core::{
        poker::HandRank,
        strategy::{ActionChoice, ActionRequest},
    };
    use std::sync::mpsc;

    const STACKED: &str = "3S TC TS 9D JD 3C QD KC 8S 2H 5C KD 3H 9C 9S 4S 8C TD AC 5H \
                           7S 4C 2S 7D 6H 8D 4H JS KS 9H 3D TH 8H KH 5S 2D QH QS AH AD \
                           7C 6D JC 6S 7H 6C 5D 2C AS 4D QC JH";

    fn stacked_deck() -> Deck {
        let cards = STACKED
            .split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect::<Vec<_>>();
        Deck::from_cards(cards).unwrap()
    }

    fn config() -> TableConfig {
        TableConfig {
            seed: Some(101),
            shuffle: false,
            ..TableConfig::default()
        }
    }

    fn seat(game: &mut Game, name: &str, chips: u32, script: &str) {
        let strategy = ScriptedStrategy::with_seed(script, 7).unwrap();
        game.add_player(Player::new(name, Chips::new(chips), strategy))
            .unwrap();
    }

    /// Alice, Bob and Cyril with a stacked deck.
    fn new_game(scripts: [&str; 3]) -> Game {
        let mut game = Game::new(config());
        seat(&mut game, "Alice", 20, scripts[0]);
        seat(&mut game, "Bob", 30, scripts[1]);
        seat(&mut game, "Cyril", 35, scripts[2]);
        game.set_deck(stacked_deck());
        game
    }

    fn chips(game: &Game) -> Vec<u32> {
        game.players().iter().map(|p| p.chips.amount()).collect()
    }

    fn states(game: &Game) -> Vec<PlayerState> {
        game.players().iter().map(|p| p.state).collect()
    }

    fn history(entries: &[BetEntry]) -> Vec<String> {
        entries.iter().map(ToString::to_string).collect()
    }

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn collect_blinds() {
        let mut game = new_game(["", "", ""]);
        game.set_button(0);

        assert_eq!(game.collect_blinds(), Ok(2));
        assert_eq!(game.pot(), Chips::new(3));
        assert_eq!(chips(&game), vec![20, 29, 33]);
        assert_eq!(
            history(game.street_history()),
            vec!["Bob SB 1", "Cyril BB 2"]
        );
        assert_eq!(game.street_bets()[&PlayerId::new("Bob")], Chips::new(1));
        assert_eq!(game.hand_bets()[&PlayerId::new("Cyril")], Chips::new(2));
    }

    #[test]
    fn blinds_skip_broke_players() {
        let mut game = new_game(["", "", ""]);
        game.players[1].chips = Chips::ZERO;
        game.players[1].start_hand();
        game.set_button(0);

        // Cyril posts the small blind and Alice the big blind.
        assert_eq!(game.collect_blinds(), Ok(0));
        assert_eq!(
            history(game.street_history()),
            vec!["Cyril SB 1", "Alice BB 2"]
        );

        game.deal_players().unwrap();
        assert_eq!(game.players()[2].cards, cards("3S TS"));
        assert_eq!(game.players()[0].cards, cards("TC 9D"));
        assert!(game.players()[1].cards.is_empty());
    }

    #[test]
    fn deal_players() {
        let mut game = new_game(["", "", ""]);
        game.set_button(0);
        game.deal_players().unwrap();

        assert_eq!(game.players()[1].cards, cards("3S 9D"));
        assert_eq!(game.players()[2].cards, cards("TC JD"));
        assert_eq!(game.players()[0].cards, cards("TS 3C"));
    }

    #[test]
    fn preflop_raise_call_fold() {
        let mut game = new_game(["RC", "CF", "R"]);
        game.set_button(0);

        assert_eq!(game.preflop(), Ok(false));
        assert_eq!(game.pot(), Chips::new(34));
        assert_eq!(chips(&game), vec![6, 24, 21]);
        assert_eq!(
            states(&game),
            vec![
                PlayerState::Playing,
                PlayerState::Folded,
                PlayerState::Playing
            ]
        );
        assert_eq!(
            history(&game.street_history()[2..]),
            vec![
                "Alice RAISE 6",
                "Bob CALL 6",
                "Cyril RAISE 14",
                "Alice CALL 14",
                "Bob FOLD 0"
            ]
        );
        assert_eq!(
            game.hand_history(Street::Preflop),
            game.street_history()
        );
    }

    #[test]
    fn preflop_all_in() {
        let mut game = new_game(["RC", "R", "RR"]);
        game.set_button(2);

        assert_eq!(game.preflop(), Ok(false));
        assert_eq!(game.pot(), Chips::new(85));
        assert_eq!(chips(&game), vec![0, 0, 0]);
        assert!(states(&game).iter().all(|s| *s == PlayerState::AllIn));
        assert_eq!(
            history(&game.street_history()[2..]),
            vec![
                "Cyril RAISE 6",
                "Alice RAISE 14",
                "Bob ALL IN 30",
                "Cyril ALL IN 35",
                "Alice ALL IN 20"
            ]
        );
    }

    #[test]
    fn all_in_side_pots_showdown() {
        let mut game = new_game(["RC", "R", "RR"]);
        game.set_button(1);

        let payoffs = game.play_hand().unwrap();
        assert_eq!(game.hand_state(), HandState::Showdown);
        assert_eq!(game.board(), cards("KC 8S 2H KD 9C").as_slice());

        // Alice two pair wins the main pot, Bob beats Cyril for the side pot.
        let pots = game
            .determine_pots()
            .iter()
            .map(|p| (p.chips.amount(), p.players.len()))
            .collect::<Vec<_>>();
        assert_eq!(pots, vec![(60, 3), (20, 2), (5, 1)]);

        let won = payoffs
            .iter()
            .map(|p| (p.player_id.to_string(), p.chips.amount()))
            .collect::<Vec<_>>();
        assert_eq!(
            won,
            vec![
                ("Alice".to_string(), 60),
                ("Bob".to_string(), 20),
                ("Cyril".to_string(), 5)
            ]
        );
        assert_eq!(chips(&game), vec![60, 20, 5]);
        assert_eq!(game.pot(), Chips::ZERO);
    }

    #[test]
    fn preflop_early_win() {
        let mut game = new_game(["F", "F", ""]);
        game.set_button(0);

        assert_eq!(game.preflop(), Ok(true));
        assert_eq!(
            history(&game.street_history()[2..]),
            vec!["Alice FOLD 0", "Bob FOLD 0"]
        );
        assert_eq!(chips(&game), vec![20, 29, 36]);
        assert_eq!(game.pot(), Chips::ZERO);
        assert_eq!(game.hand_state(), HandState::EarlyWin);
        assert_eq!(
            game.payoffs(),
            &[Payoff {
                player_id: PlayerId::new("Cyril"),
                chips: Chips::new(3)
            }]
        );
    }

    #[test]
    fn flop_betting() {
        let mut game = new_game(["RCR", "CF", "RCC"]);
        game.set_button(0);

        assert_eq!(game.preflop(), Ok(false));
        assert_eq!(game.flop(), Ok(false));

        assert_eq!(game.board(), cards("KC 8S 2H").as_slice());
        assert_eq!(game.pot(), Chips::new(42));
        assert_eq!(chips(&game), vec![2, 24, 17]);
        assert_eq!(
            history(game.street_history()),
            vec!["Cyril CHECK 0", "Alice RAISE 4", "Cyril CALL 4"]
        );
        assert_eq!(game.hand_history(Street::Preflop).len(), 7);
        assert!(game.hand_history(Street::Turn).is_empty());

        let total = game.hand_bets().values().sum::<Chips>();
        assert_eq!(total, game.pot());
    }

    #[test]
    fn flop_all_in_side_pot() {
        let mut game = new_game(["RCRC", "CF", "RCR"]);
        game.set_button(0);

        assert_eq!(game.preflop(), Ok(false));
        assert_eq!(game.flop(), Ok(false));

        assert_eq!(game.pot(), Chips::new(52));
        assert_eq!(chips(&game), vec![0, 24, 9]);
        assert_eq!(game.players()[0].state, PlayerState::AllIn);
        assert_eq!(
            history(game.street_history()),
            vec![
                "Cyril CHECK 0",
                "Alice RAISE 4",
                "Cyril RAISE 12",
                "Alice ALL IN 6"
            ]
        );

        let pots = game.determine_pots();
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].chips, Chips::new(46));
        assert_eq!(pots[0].players.len(), 2);
        assert!(pots[0].players.contains(&PlayerId::new("Alice")));
        assert!(pots[0].players.contains(&PlayerId::new("Cyril")));
        assert_eq!(pots[1].chips, Chips::new(6));
        assert_eq!(pots[1].players.len(), 1);
        assert!(pots[1].players.contains(&PlayerId::new("Cyril")));
    }

    #[test]
    fn showdown() {
        let mut game = new_game(["RCRC", "CF", "RCR"]);
        game.set_button(2);

        let payoffs = game.play_hand().unwrap();
        assert_eq!(game.button(), 0);
        assert_eq!(game.board(), cards("KC 8S 2H KD 9C").as_slice());
        assert_eq!(game.hand_state(), HandState::Showdown);
        assert_eq!(game.pot(), Chips::ZERO);
        assert_eq!(chips(&game), vec![0, 24, 61]);
        assert_eq!(
            payoffs,
            vec![Payoff {
                player_id: PlayerId::new("Cyril"),
                chips: Chips::new(52)
            }]
        );

        let hand = game.hands()[&PlayerId::new("Cyril")];
        assert_eq!(hand.rank(), HandRank::OnePair);
        assert!(hand > game.hands()[&PlayerId::new("Alice")]);
        assert!(!game.hands().contains_key(&PlayerId::new("Bob")));

        // Alice is broke.
        assert_eq!(game.count_with_chips(), 2);
    }

    #[test]
    fn six_players_chop() {
        let mut game = Game::new(config());
        for (name, chips) in [
            ("a", 10),
            ("b", 11),
            ("c", 11),
            ("d", 12),
            ("e", 12),
            ("f", 22),
        ] {
            seat(&mut game, name, chips, "RRR");
        }

        let payoffs = game.play_hand().unwrap();
        assert_eq!(game.board(), cards("2H 3H 4H 6H 8H").as_slice());
        assert_eq!(chips(&game), vec![10, 11, 11, 12, 12, 22]);
        assert_eq!(payoffs.len(), 6);
        assert_eq!(
            payoffs.iter().map(|p| p.chips).sum::<Chips>(),
            Chips::new(70)
        );

        let best = game.hands().values().max().copied().unwrap();
        assert_eq!(best.rank(), HandRank::Flush);
        assert!(game.hands().values().all(|h| *h == best));
    }

    #[test]
    fn odd_chips_go_left_of_button() {
        let mut game = Game::new(config());
        seat(&mut game, "a", 10, "");
        seat(&mut game, "b", 10, "");
        seat(&mut game, "c", 10, "");

        // Three chips, two winners, a folded player.
        game.hand_bets.insert(PlayerId::new("a"), Chips::new(1));
        game.hand_bets.insert(PlayerId::new("b"), Chips::new(1));
        game.hand_bets.insert(PlayerId::new("c"), Chips::new(1));
        game.pot = Chips::new(3);
        game.players[1].state = PlayerState::Folded;
        game.board = cards("2H 3H 4H 6H 8H");
        game.players[0].cards = cards("2D 3D");
        game.players[2].cards = cards("2C 3C");
        game.set_button(1);

        game.showdown().unwrap();
        assert_eq!(chips(&game), vec![11, 10, 12]);
        assert_eq!(game.pot(), Chips::ZERO);
    }

    #[test]
    fn hand_messages() {
        let (tx, rx) = mpsc::channel::<Message>();
        let mut game = new_game(["F", "F", ""]);
        game.set_sink(tx);
        game.set_button(2);

        game.play_hand().unwrap();
        let messages = rx.try_iter().collect::<Vec<_>>();

        assert_eq!(
            messages.first(),
            Some(&Message::StartHand {
                button: PlayerId::new("Alice"),
                small_blind: Chips::new(1),
                big_blind: Chips::new(2),
            })
        );
        assert_eq!(messages.last(), Some(&Message::EndHand));
        assert!(messages.contains(&Message::Payoff {
            player_id: PlayerId::new("Cyril"),
            chips: Chips::new(3),
        }));
        assert!(messages.contains(&Message::Action {
            player_id: PlayerId::new("Bob"),
            action: PlayerAction::Fold,
            bet: Chips::ZERO,
            pot: Chips::new(3),
        }));
    }

    #[test]
    fn seating() {
        let mut game = Game::new(TableConfig {
            seats: 2,
            ..config()
        });
        seat(&mut game, "Alice", 20, "");

        assert_eq!(game.start_hand(), Err(Error::NotEnoughPlayers));

        let dup = Player::new("Alice", Chips::new(10), ScriptedStrategy::random(None));
        assert_eq!(
            game.add_player(dup),
            Err(Error::DuplicatePlayer(PlayerId::new("Alice")))
        );

        seat(&mut game, "Bob", 20, "");
        let full = Player::new("Cyril", Chips::new(10), ScriptedStrategy::random(None));
        assert_eq!(game.add_player(full), Err(Error::TableFull));

        assert_eq!(
            game.remove_player(&PlayerId::new("Cyril")).unwrap_err(),
            Error::PlayerNotFound(PlayerId::new("Cyril"))
        );

        game.set_button(1);
        let bob = game.remove_player(&PlayerId::new("Bob")).unwrap();
        assert_eq!(bob.chips, Chips::new(20));
        assert_eq!(game.button(), 0);
        assert_eq!(game.players().len(), 1);

        game.hand_state = HandState::Flop;
        assert_eq!(
            game.remove_player(&PlayerId::new("Alice")).unwrap_err(),
            Error::HandInProgress
        );
    }

    #[test]
    fn strategy_error_aborts_hand() {
        let mut game = Game::new(config());
        let mut requests = 0;
        let alice = move |_: &ActionRequest| -> Result<ActionChoice> {
            requests += 1;
            if requests > 1 {
                Err(Error::Disconnected(PlayerId::new("Alice")))
            } else {
                Ok(ActionChoice::Call)
            }
        };
        game.add_player(Player::new("Alice", Chips::new(20), alice))
            .unwrap();
        game.add_player(Player::new("Bob", Chips::new(30), CallingStation))
            .unwrap();
        game.add_player(Player::new("Cyril", Chips::new(35), CallingStation))
            .unwrap();
        game.set_deck(stacked_deck());
        game.set_button(2);

        // Alice calls preflop and fails on the flop.
        assert_eq!(
            game.play_hand(),
            Err(Error::Disconnected(PlayerId::new("Alice")))
        );
        assert_eq!(game.hand_state(), HandState::Aborted);
        assert_eq!(game.pot(), Chips::ZERO);
        assert_eq!(chips(&game), vec![20, 30, 35]);
        assert!(game.hand_bets().is_empty());
        assert!(game.payoffs().is_empty());

        let alice = game.remove_player(&PlayerId::new("Alice")).unwrap();
        assert_eq!(alice.chips, Chips::new(20));
        seat(&mut game, "Dave", 10, "");

        game.play_hand().unwrap();
        let total = game.players().iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(total, Chips::new(75));
    }

    #[test]
    fn abort_takes_back_payoffs() {
        let mut game = new_game(["RC", "R", "RR"]);
        game.set_button(1);
        game.play_hand().unwrap();
        assert_eq!(chips(&game), vec![60, 20, 5]);

        game.abort_hand();
        assert_eq!(chips(&game), vec![20, 30, 35]);
        assert_eq!(game.hand_state(), HandState::Aborted);
        assert!(!game.hand_state().in_progress());
        assert_eq!(states(&game), vec![PlayerState::Playing; 3]);
    }

    #[test]
    fn invariant_errors() {
        let mut game = new_game(["", "", ""]);
        game.pot = Chips::new(5);
        assert_eq!(game.start_hand(), Err(Error::NonZeroPot(Chips::new(5))));

        game.board = cards("2H 3H 4H 6H 8H");
        assert_eq!(game.deal_board(1), Err(Error::TooManyCommunityCards));

        game.set_deck(Deck::from_cards(cards("AS KS")).unwrap());
        assert_eq!(game.deal_players(), Err(Error::EmptyDeck));
        assert_eq!(Error::EmptyDeck.kind(), holdem_core::ErrorKind::Invariant);
    }

    #[test]
    fn random_hands_keep_chips() {
        let play = |seed: u64| {
            let mut game = Game::new(TableConfig {
                seed: Some(seed),
                ..TableConfig::default()
            });

            for idx in 0..5 {
                let strategy = ScriptedStrategy::random(Some(seed + idx));
                let player = Player::new(format!("p{idx}"), Chips::new(100), strategy);
                game.add_player(player).unwrap();
            }

            let mut payoffs = Vec::new();
            for _ in 0..50 {
                if game.count_with_chips() < 2 {
                    break;
                }

                payoffs.push(game.play_hand().unwrap());

                let total = game.players().iter().map(|p| p.chips).sum::<Chips>();
                assert_eq!(total, Chips::new(500));
                assert_eq!(game.pot(), Chips::ZERO);
            }

            (payoffs, chips(&game))
        };

        assert_eq!(play(9), play(9));
    }
}
