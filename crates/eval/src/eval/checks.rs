// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand category checks.
//!
//! Each check returns the five cards that make the category, or an empty
//! vector if the cards don't contain the category. Checks assume that the
//! cards don't contain a stronger category, the evaluator runs them from the
//! strongest to the weakest.
use ahash::AHashMap;
use std::cmp::Reverse;

use holdem_cards::{Card, Rank};

use super::HandRank;

// Ace plays both high and low.
const STRAIGHT_RANKS: [Rank; 14] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Trey,
    Rank::Deuce,
    Rank::Ace,
];

/// Runs the check for the given category.
pub fn check(rank: HandRank, cards: &[Card]) -> Vec<Card> {
    match rank {
        HandRank::RoyalFlush => royal_flush(cards),
        HandRank::StraightFlush => straight_flush(cards),
        HandRank::FourOfAKind => four_of_a_kind(cards),
        HandRank::FullHouse => full_house(cards),
        HandRank::Flush => flush(cards),
        HandRank::Straight => straight(cards),
        HandRank::ThreeOfAKind => three_of_a_kind(cards),
        HandRank::TwoPair => two_pair(cards),
        HandRank::OnePair => one_pair(cards),
        HandRank::HighCard => high_card(cards),
    }
}

/// Groups cards by rank.
///
/// Larger groups come first, groups with the same size are sorted by
/// descending rank. Cards in a group keep the input order.
pub fn group_by_rank(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups = AHashMap::<Rank, Vec<Card>>::default();
    for card in cards {
        groups.entry(card.rank()).or_default().push(*card);
    }

    let mut groups = groups.into_values().collect::<Vec<_>>();
    groups.sort_by_key(|g| Reverse((g.len(), g[0].rank())));
    groups
}

/// Groups cards by suit.
///
/// Larger groups come first, groups with the same size are sorted by
/// descending suit. Cards in a group are sorted by descending rank.
pub fn group_by_suit(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups = AHashMap::<_, Vec<Card>>::default();
    for card in cards {
        groups.entry(card.suit()).or_default().push(*card);
    }

    let mut groups = groups.into_values().collect::<Vec<_>>();
    for group in &mut groups {
        group.sort_by_key(|c| Reverse(c.rank()));
    }

    groups.sort_by_key(|g| Reverse((g.len(), g[0].suit())));
    groups
}

/// Returns the `k` highest cards not in `used`, or an empty vector if there
/// are not enough cards.
fn high_cards(cards: &[Card], k: usize, used: &[Card]) -> Vec<Card> {
    let mut sorted = cards
        .iter()
        .filter(|c| !used.contains(c))
        .copied()
        .collect::<Vec<_>>();
    if sorted.len() < k {
        return Vec::new();
    }

    sorted.sort_by_key(|c| Reverse(c.rank()));
    sorted.truncate(k);
    sorted
}

/// Completes a hand with kickers.
fn with_kickers(cards: &[Card], mut hand: Vec<Card>) -> Vec<Card> {
    let kickers = high_cards(cards, 5 - hand.len(), &hand);
    if kickers.is_empty() && hand.len() < 5 {
        return Vec::new();
    }

    hand.extend(kickers);
    hand
}

fn royal_flush(cards: &[Card]) -> Vec<Card> {
    let hand = straight_flush(cards);
    match hand.first() {
        Some(c) if c.rank() == Rank::Ace => hand,
        _ => Vec::new(),
    }
}

fn straight_flush(cards: &[Card]) -> Vec<Card> {
    group_by_suit(cards)
        .into_iter()
        .filter(|g| g.len() >= 5)
        .map(|g| straight(&g))
        .filter(|h| !h.is_empty())
        .max_by(|a, b| a[0].cmp_rank(&b[0]))
        .unwrap_or_default()
}

fn four_of_a_kind(cards: &[Card]) -> Vec<Card> {
    match group_by_rank(cards).first() {
        Some(g) if g.len() == 4 => with_kickers(cards, g.clone()),
        _ => Vec::new(),
    }
}

fn full_house(cards: &[Card]) -> Vec<Card> {
    let groups = group_by_rank(cards);
    match groups.as_slice() {
        [trips, pair, ..] if trips.len() == 3 && pair.len() >= 2 => {
            let mut hand = trips.clone();
            hand.extend_from_slice(&pair[..2]);
            hand
        }
        _ => Vec::new(),
    }
}

fn flush(cards: &[Card]) -> Vec<Card> {
    match group_by_suit(cards).into_iter().next() {
        Some(mut g) if g.len() >= 5 => {
            g.truncate(5);
            g
        }
        _ => Vec::new(),
    }
}

fn straight(cards: &[Card]) -> Vec<Card> {
    for window in STRAIGHT_RANKS.windows(5) {
        let hand = window
            .iter()
            .filter_map(|r| cards.iter().find(|c| c.rank() == *r).copied())
            .collect::<Vec<_>>();
        if hand.len() == 5 {
            return hand;
        }
    }

    Vec::new()
}

fn three_of_a_kind(cards: &[Card]) -> Vec<Card> {
    match group_by_rank(cards).first() {
        Some(g) if g.len() == 3 => with_kickers(cards, g.clone()),
        _ => Vec::new(),
    }
}

fn two_pair(cards: &[Card]) -> Vec<Card> {
    let groups = group_by_rank(cards);
    match groups.as_slice() {
        [p0, p1, ..] if p0.len() == 2 && p1.len() == 2 => {
            let mut hand = p0.clone();
            hand.extend_from_slice(p1);
            with_kickers(cards, hand)
        }
        _ => Vec::new(),
    }
}

fn one_pair(cards: &[Card]) -> Vec<Card> {
    match group_by_rank(cards).first() {
        Some(g) if g.len() == 2 => with_kickers(cards, g.clone()),
        _ => Vec::new(),
    }
}

fn high_card(cards: &[Card]) -> Vec<Card> {
    high_cards(cards, 5, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_cards::Suit;

    // The stacked deck used by the table tests.
    const STACKED: &str = "3S TC TS 9D JD 3C QD KC 8S 2H 5C KD 3H 9C 9S 4S 8C TD AC 5H 7S 4C 2S \
                           7D 6H 8D 4H JS KS 9H 3D TH 8H KH 5S 2D QH QS AH AD 7C 6D JC 6S 7H 6C \
                           5D 2C AS 4D QC JH";

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect()
    }

    fn stacked() -> Vec<Card> {
        cards(STACKED)
    }

    #[test]
    fn group_cards_by_rank() {
        let deck = stacked();
        let groups = group_by_rank(&deck[..6]);
        assert_eq!(
            groups,
            vec![
                vec![deck[1], deck[2]],
                vec![deck[0], deck[5]],
                vec![deck[4]],
                vec![deck[3]],
            ]
        );
    }

    #[test]
    fn group_cards_by_suit() {
        let deck = stacked();
        let groups = group_by_suit(&deck[..6]);
        assert_eq!(
            groups,
            vec![
                vec![deck[2], deck[0]],
                vec![deck[1], deck[5]],
                vec![deck[4], deck[3]],
            ]
        );
        assert_eq!(groups[0][0].suit(), Suit::Spades);
    }

    #[test]
    fn check_royal_flush() {
        let deck = stacked();
        let royal = cards("AC KC QC JC TC");

        let mut hand = deck[2..4].to_vec();
        hand.extend_from_slice(&royal);
        assert_eq!(royal_flush(&hand), royal);

        // King high straight flush.
        let hand = cards("KC QC JC TC 9C 3S 3D");
        assert!(royal_flush(&hand).is_empty());
        assert_eq!(straight_flush(&hand), cards("KC QC JC TC 9C"));
    }

    #[test]
    fn check_straight_flush() {
        let wheel = cards("5D 4D 3D 2D AD");
        let mut hand = cards("KS 9C");
        hand.extend_from_slice(&wheel);
        assert_eq!(straight_flush(&hand), wheel);

        let hand = cards("4H 8H 6H 3S 5H 7H KD");
        assert_eq!(straight_flush(&hand), cards("8H 7H 6H 5H 4H"));

        // Straight and flush but not in the same cards.
        let hand = cards("4H 8H 6H 2H 5H 7C KD");
        assert!(straight_flush(&hand).is_empty());
        assert!(!straight(&hand).is_empty());
        assert!(!flush(&hand).is_empty());
    }

    #[test]
    fn check_four_of_a_kind() {
        let deck = stacked();
        let hand = four_of_a_kind(&deck[..deck.len() - 3]);
        assert_eq!(hand[..4], cards("AC AH AD AS")[..]);
        assert_eq!(hand[4], "KC".parse::<Card>().unwrap());

        assert!(four_of_a_kind(&deck[..13]).is_empty());
    }

    #[test]
    fn check_full_house() {
        let deck = stacked();
        let trips = cards("7C 7D 7S");

        let mut hand = trips.clone();
        hand.extend_from_slice(&deck[..4]);
        let mut expected = trips.clone();
        expected.extend_from_slice(&deck[1..3]);
        assert_eq!(full_house(&hand), expected);

        let mut hand = trips.clone();
        hand.extend_from_slice(&deck[4..8]);
        assert!(full_house(&hand).is_empty());
        assert!(full_house(&deck[..12]).is_empty());
    }

    #[test]
    fn check_flush() {
        let hand = cards("3S KD JS 2S 9C AS 7S");
        assert_eq!(flush(&hand), cards("AS JS 7S 3S 2S"));

        let hand = cards("3S KD JS 2S 9C AD 7S");
        assert!(flush(&hand).is_empty());
    }

    #[test]
    fn check_straight() {
        let hand = cards("6C AS 4H 2D 5S TC 3S JH");
        assert_eq!(straight(&hand), cards("6C 5S 4H 3S 2D"));

        let hand = cards("AS 5S 4H 2D 3S TC JH");
        assert_eq!(straight(&hand), cards("5S 4H 3S 2D AS"));

        let hand = cards("AS 5S 4H 2D TC JH 9C");
        assert!(straight(&hand).is_empty());

        // Ace high, first card of each rank.
        let hand = cards("AS KH QD JC TS TD 9H");
        assert_eq!(straight(&hand), cards("AS KH QD JC TS"));
    }

    #[test]
    fn check_three_of_a_kind() {
        let hand = cards("7C KH 7D 2H JH 7S QH");
        assert_eq!(three_of_a_kind(&hand), cards("7C 7D 7S KH QH"));

        let hand = cards("7C KH 2H JH 7S QH");
        assert!(three_of_a_kind(&hand).is_empty());
    }

    #[test]
    fn check_two_pair() {
        let hand = cards("2C 2D JH JS 4H QS TC");
        assert_eq!(two_pair(&hand), cards("JH JS 2C 2D QS"));

        // Three pairs, the lowest pair plays as a kicker.
        let hand = cards("2C 2D JH JS 4H 4S 3C");
        assert_eq!(two_pair(&hand), cards("JH JS 4H 4S 3C"));

        let hand = cards("2C 3D JH QS 4H 9S TC");
        assert!(two_pair(&hand).is_empty());
    }

    #[test]
    fn check_one_pair() {
        let hand = cards("2C 2D 9H 5H QH 7H JH");
        assert_eq!(one_pair(&hand), cards("2C 2D QH JH 9H"));

        let hand = cards("2H 3H 5H 7H 9H JH KH");
        assert!(one_pair(&hand).is_empty());
    }

    #[test]
    fn check_high_card() {
        let deck = stacked();
        assert_eq!(high_card(&deck[2..9]), cards("KC QD JD TS 9D"));
        assert!(high_card(&deck[..4]).is_empty());
    }

    #[test]
    fn check_dispatch() {
        let hand = cards("7C 7D 7S JC JD 6H 2H");
        for rank in HandRank::STRONGEST_FIRST {
            let res = check(rank, &hand);
            let expect_match = matches!(
                rank,
                HandRank::FullHouse | HandRank::ThreeOfAKind | HandRank::HighCard
            );
            assert_eq!(!res.is_empty(), expect_match, "{rank}");
        }
    }
}
