// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Result, bail};
use clap::Parser;
use log::{error, info};

use holdem_bot::ScriptedStrategy;
use holdem_core::poker::Chips;
use holdem_table::{Player, Table, TableConfig};

const NICKNAMES: [&str; 10] = [
    "Alice", "Bob", "Cyril", "Dana", "Ethan", "Fiona", "Gus", "Hilda", "Ivan", "Jules",
];

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players.
    #[clap(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Starting chips for each player.
    #[clap(long, default_value_t = 1000)]
    chips: u32,
    /// The big blind, the small blind is half of it.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Number of hands to play.
    #[clap(long, default_value_t = 100)]
    hands: usize,
    /// Seed for reproducible games.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.big_blind < 2 {
        bail!("Big blind must be at least 2");
    }

    let big_blind = Chips::new(cli.big_blind);
    let table = Table::new(TableConfig {
        seats: NICKNAMES.len(),
        small_blind: big_blind / 2,
        big_blind,
        seed: cli.seed,
        shuffle: true,
    });

    for (idx, name) in NICKNAMES.iter().take(cli.players as usize).enumerate() {
        let strategy = ScriptedStrategy::random(cli.seed.map(|s| s.wrapping_add(idx as u64)));
        table.add_player(Player::new(*name, Chips::new(cli.chips), strategy))?;
    }

    let mut played = 0;
    while played < cli.hands && table.count_with_chips() > 1 {
        table.play_hand()?;
        played += 1;
    }

    info!("Played {played} hands");
    for (player_id, chips) in table.chips() {
        info!("{player_id} {chips}");
    }

    Ok(())
}
