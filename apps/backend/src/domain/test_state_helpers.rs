//! Test-only game state builders for domain unit tests.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::deck::Deck;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, SeatIndex};

pub const NAMES: [&str; PLAYERS] = ["north", "east", "south", "west"];

pub fn hand(tokens: &[&str]) -> Deck {
    let mut deck: Deck = try_parse_cards(tokens)
        .expect("hardcoded valid card tokens")
        .into();
    deck.sort();
    deck
}

pub fn fresh_state(max_points: u32) -> GameState {
    GameState::new(NAMES.iter().map(|s| s.to_string()).collect(), max_points)
        .expect("four unique names")
}

/// A state mid-round with the given hands and `leader` to lead.
pub fn state_with_hands(hands: [&[&str]; PLAYERS], leader: SeatIndex) -> GameState {
    let mut state = fresh_state(100);
    state.begin_round(hands.map(hand));
    state.leader = Some(leader);
    state
}
