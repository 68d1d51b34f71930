// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Main and side pots.
use ahash::AHashSet;

use holdem_core::poker::{Chips, PlayerId};

/// A pot that contains players bets.
#[derive(Debug, Clone, Default)]
pub struct Pot {
    /// The pot chips.
    pub chips: Chips,
    /// The players that can win this pot.
    pub players: AHashSet<PlayerId>,
}

/// A player contribution to the pots.
#[derive(Debug, Clone)]
pub struct Contribution {
    /// The player id.
    pub player_id: PlayerId,
    /// The chips the player put in the pot in this hand.
    pub chips: Chips,
    /// The player can still win chips.
    pub in_hand: bool,
}

/// Splits the hand contributions into a main pot and side pots.
///
/// Contributions must be in seat order, players with the same contribution
/// are resolved in that order. Pots go from the one all players in the hand
/// can win to the one only the biggest stacks can win. Folded players chips
/// count toward the pots they contributed to, chips folded above the highest
/// in-hand contribution go to the last pot.
pub fn split_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut remaining = contributions.iter().map(|c| c.chips).collect::<Vec<_>>();
    let mut unresolved = contributions
        .iter()
        .enumerate()
        .filter(|(_, c)| c.in_hand)
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let mut pots = Vec::<Pot>::new();
    while !unresolved.is_empty() {
        // The first minimum in seat order.
        let (pos, min_bet) = unresolved
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, remaining[idx]))
            .min_by_key(|&(_, bet)| bet)
            .unwrap_or_default();

        if min_bet > Chips::ZERO {
            let mut pot = Pot {
                chips: Chips::ZERO,
                players: unresolved
                    .iter()
                    .map(|&idx| contributions[idx].player_id.clone())
                    .collect(),
            };

            for bet in &mut remaining {
                let chips = (*bet).min(min_bet);
                pot.chips += chips;
                *bet -= chips;
            }

            pots.push(pot);
        }

        unresolved.remove(pos);
    }

    let leftover = remaining.iter().sum::<Chips>();
    if leftover > Chips::ZERO {
        if let Some(pot) = pots.last_mut() {
            pot.chips += leftover;
        }
    }

    pots
}

/// Splits a pot between winners, the odd chips go to the first winners.
pub fn split_chips(chips: Chips, winners: usize) -> Vec<Chips> {
    let Ok(count) = u32::try_from(winners) else {
        return Vec::new();
    };

    if count == 0 {
        return Vec::new();
    }

    let share = chips / count;
    let odd = (chips % count).amount();
    (0..count)
        .map(|idx| if idx < odd { share + Chips::new(1) } else { share })
        .collect()
}
