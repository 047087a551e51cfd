use std::collections::HashSet;

use crate::domain::deck::{deal_hands, Deck};
use crate::domain::passing::{apply_pass, check_pass, route_passed_cards, PassDirection};
use crate::domain::test_state_helpers::{fresh_state, hand};
use crate::domain::Card;
use crate::errors::domain::ValidationKind;

#[test]
fn direction_cycles_once_per_round() {
    let mut dir = PassDirection::Left;
    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push(dir);
        dir = dir.next();
    }
    use PassDirection::*;
    assert_eq!(seen, vec![Left, Right, Across, None, Left, Right, Across, None]);
}

#[test]
fn routing_follows_fixed_permutation() {
    let passed = [
        hand(&["2C"]),
        hand(&["3C"]),
        hand(&["4C"]),
        hand(&["5C"]),
    ];
    let left = route_passed_cards(PassDirection::Left, passed.clone());
    // Seat 0 receives from seat 3 when passing left.
    assert_eq!(left[0], hand(&["5C"]));
    assert_eq!(left[1], hand(&["2C"]));

    let right = route_passed_cards(PassDirection::Right, passed.clone());
    assert_eq!(right[0], hand(&["3C"]));

    let across = route_passed_cards(PassDirection::Across, passed.clone());
    assert_eq!(across[0], hand(&["4C"]));
    assert_eq!(across[2], hand(&["2C"]));

    let hold = route_passed_cards(PassDirection::None, passed);
    assert!(hold.iter().all(Deck::is_empty));
}

#[test]
fn pass_needs_three_distinct_indices() {
    let h = hand(&["2C", "3C", "4C", "5C"]);
    assert!(check_pass(&h, &[0, 1, 3]).is_ok());
    for bad in [&[0, 1][..], &[0, 0, 1], &[0, 1, 4], &[0, 1, 2, 3]] {
        let err = check_pass(&h, bad).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::MalformedAnswer));
    }
}

#[test]
fn pass_keeps_thirteen_cards_and_moves_picks() {
    let mut state = fresh_state(100);
    state.begin_round(deal_hands(Deck::full()).unwrap());
    let picks: [Vec<usize>; 4] = std::array::from_fn(|_| vec![0, 1, 2]);
    let outgoing: Vec<Vec<Card>> = state
        .seats
        .iter()
        .map(|s| s.hand.iter().take(3).copied().collect())
        .collect();

    apply_pass(&mut state, &picks).unwrap();

    let mut all = HashSet::new();
    for seat in &state.seats {
        assert_eq!(seat.hand.len(), 13);
        all.extend(seat.hand.iter().copied());
        let mut sorted = seat.hand.clone();
        sorted.sort();
        assert_eq!(sorted, seat.hand);
    }
    assert_eq!(all.len(), 52);
    // Left: seat 1 now holds what seat 0 gave away.
    for card in &outgoing[0] {
        assert!(state.seats[1].hand.iter().any(|c| c == card));
    }
    assert_eq!(state.pass_direction, PassDirection::Right);
}

#[test]
fn malformed_pick_moves_nothing() {
    let mut state = fresh_state(100);
    state.begin_round(deal_hands(Deck::full()).unwrap());
    let before: Vec<Deck> = state.seats.iter().map(|s| s.hand.clone()).collect();
    let picks = [vec![0, 1, 2], vec![0, 1], vec![0, 1, 2], vec![0, 1, 2]];

    assert!(apply_pass(&mut state, &picks).is_err());

    let after: Vec<Deck> = state.seats.iter().map(|s| s.hand.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(state.pass_direction, PassDirection::Left);
}

#[test]
fn hold_round_only_advances_direction() {
    let mut state = fresh_state(100);
    state.pass_direction = PassDirection::None;
    state.begin_round(deal_hands(Deck::full()).unwrap());
    let before: Vec<Deck> = state.seats.iter().map(|s| s.hand.clone()).collect();

    apply_pass(&mut state, &Default::default()).unwrap();

    let after: Vec<Deck> = state.seats.iter().map(|s| s.hand.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(state.pass_direction, PassDirection::Left);
}
