// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example categories
// ...
// Total hands      1000000
// Elapsed:         ...
// Hands/sec:       ...
//
// ROYAL FLUSH      ...
// STRAIGHT FLUSH   ...
// ...
// ```

use rand::{SeedableRng, rngs::StdRng};
use std::time::Instant;

use holdem_eval::*;

fn main() {
    // Evaluate one million random 7 cards hands.
    let now = Instant::now();
    let mut counts = [0usize; 10];
    let mut rng = StdRng::seed_from_u64(7);

    Deck::default().sample(&mut rng, 1_000_000, 7, |hand| {
        if let Ok(hand) = Hand::eval(hand) {
            counts[hand.rank() as usize] += 1;
        }
    });

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for rank in HandRank::STRONGEST_FIRST {
        let count = counts[rank as usize];
        let pct = 100.0 * count as f64 / total as f64;
        println!("{:<16} {count:>8} {pct:>8.4}%", rank.label());
    }
}
