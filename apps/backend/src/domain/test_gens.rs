// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::deck::Deck;
use crate::domain::{Card, Rank, Suit};

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// All 52 cards in a random order.
pub fn shuffled_cards() -> impl Strategy<Value = Vec<Card>> {
    Just(Deck::full().as_slice().to_vec()).prop_shuffle()
}

/// `count` distinct cards.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    shuffled_cards().prop_map(move |mut cards| {
        cards.truncate(count);
        cards
    })
}

/// A sorted hand of 1..=13 distinct cards.
pub fn hand() -> impl Strategy<Value = Deck> {
    (1usize..=13).prop_flat_map(unique_cards).prop_map(|cards| {
        let mut deck = Deck::from(cards);
        deck.sort();
        deck
    })
}

/// Four disjoint 13-card hands, as dealt.
pub fn dealt_hands() -> impl Strategy<Value = [Deck; 4]> {
    shuffled_cards().prop_map(|cards| {
        crate::domain::deck::deal_hands(Deck::from(cards)).expect("52 cards deal evenly")
    })
}
