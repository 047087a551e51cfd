//! Pass direction cycle and the fixed seat permutation used to move cards.

use serde::{Deserialize, Serialize};

use crate::domain::deck::Deck;
use crate::domain::rules::{PASS_COUNT, PLAYERS};
use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassDirection {
    Left,
    Right,
    Across,
    None,
}

impl PassDirection {
    /// `left → right → across → none → left …`, advanced once per round.
    pub const fn next(self) -> Self {
        match self {
            PassDirection::Left => PassDirection::Right,
            PassDirection::Right => PassDirection::Across,
            PassDirection::Across => PassDirection::None,
            PassDirection::None => PassDirection::Left,
        }
    }

    /// Seat whose passed cards `receiver` takes; `None` for a no-pass round.
    pub const fn source_for(self, receiver: usize) -> Option<usize> {
        let offset = match self {
            PassDirection::Left => 3,
            PassDirection::Right => 1,
            PassDirection::Across => 2,
            PassDirection::None => return None,
        };
        Some((receiver + offset) % PLAYERS)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassDirection::Left => "left",
            PassDirection::Right => "right",
            PassDirection::Across => "across",
            PassDirection::None => "none",
        }
    }
}

/// Hand each seat's outgoing cards to its receiver.
///
/// `passed[i]` holds the cards seat `i` gave away; the returned array holds
/// what each seat receives. A no-pass direction hands nothing to anyone.
pub fn route_passed_cards(direction: PassDirection, passed: [Deck; PLAYERS]) -> [Deck; PLAYERS] {
    let mut received: [Deck; PLAYERS] = Default::default();
    for (receiver, slot) in received.iter_mut().enumerate() {
        if let Some(source) = direction.source_for(receiver) {
            *slot = passed[source].clone();
        }
    }
    received
}

/// Exactly three distinct indices into `hand`.
pub fn check_pass(hand: &Deck, indices: &[usize]) -> Result<(), DomainError> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let in_range = indices.iter().all(|&i| i < hand.len());
    if indices.len() != PASS_COUNT || sorted.len() != PASS_COUNT || !in_range {
        return Err(DomainError::validation(
            ValidationKind::MalformedAnswer,
            "Could not understand answer",
        ));
    }
    Ok(())
}

/// Move every seat's picks to its receiver, re-sort, and advance the direction.
///
/// All four picks are checked before any card moves. A no-pass round only
/// advances the direction.
pub fn apply_pass(state: &mut GameState, picks: &[Vec<usize>; PLAYERS]) -> Result<(), DomainError> {
    let direction = state.pass_direction;
    if direction != PassDirection::None {
        for (seat, indices) in state.seats.iter().zip(picks) {
            check_pass(&seat.hand, indices)?;
        }
        let mut outgoing: [Deck; PLAYERS] = Default::default();
        for ((seat, indices), out) in state.seats.iter_mut().zip(picks).zip(outgoing.iter_mut()) {
            let cards = seat.hand.take_many(indices).ok_or_else(|| {
                DomainError::validation(ValidationKind::MalformedAnswer, "Could not understand answer")
            })?;
            out.append(cards);
        }
        let incoming = route_passed_cards(direction, outgoing);
        for (seat, cards) in state.seats.iter_mut().zip(incoming) {
            seat.hand.append(cards.iter().copied());
            seat.hand.sort();
        }
    }
    state.pass_direction = direction.next();
    Ok(())
}
