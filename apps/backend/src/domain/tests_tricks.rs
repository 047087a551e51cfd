use crate::domain::test_state_helpers::{hand, state_with_hands};
use crate::domain::tricks::{check_play, legal_plays, play_card, seat_to_play, TrickContext};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::ValidationKind;

const OPENING: TrickContext = TrickContext {
    lead: None,
    first_trick: true,
    hearts_broken: false,
};

fn kind_of(result: Result<Card, crate::errors::domain::DomainError>) -> Option<ValidationKind> {
    result.err().and_then(|e| e.validation_kind())
}

#[test]
fn first_lead_must_be_two_of_clubs() {
    let h = hand(&["2C", "3C", "AH"]);
    assert_eq!(check_play(&h, 0, OPENING).unwrap(), Card::TWO_OF_CLUBS);
    assert_eq!(
        kind_of(check_play(&h, 1, OPENING)),
        Some(ValidationKind::MustLeadTwoOfClubs)
    );
    assert_eq!(legal_plays(&h, OPENING), vec![0]);
}

#[test]
fn hearts_cannot_lead_until_broken() {
    let h = hand(&["3C", "AH"]);
    let ctx = TrickContext {
        lead: None,
        first_trick: false,
        hearts_broken: false,
    };
    let err = check_play(&h, 1, ctx).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::HeartsNotBroken));
    assert_eq!(err.detail(), "Hearts not broken, lead with another suit");

    let broken = TrickContext {
        hearts_broken: true,
        ..ctx
    };
    assert!(check_play(&h, 1, broken).is_ok());
}

#[test]
fn hearts_only_hand_may_lead_hearts() {
    let h = hand(&["2H", "9H"]);
    let ctx = TrickContext {
        lead: None,
        first_trick: false,
        hearts_broken: false,
    };
    assert_eq!(legal_plays(&h, ctx), vec![0, 1]);
}

#[test]
fn must_follow_lead_suit_when_able() {
    let h = hand(&["5C", "KD", "AH"]);
    let ctx = TrickContext {
        lead: Some(Suit::Clubs),
        first_trick: false,
        hearts_broken: false,
    };
    let err = check_play(&h, 2, ctx).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::MustFollowSuit));
    assert_eq!(err.detail(), "Must play the lead suit: clubs");
    assert_eq!(legal_plays(&h, ctx), vec![0]);
}

#[test]
fn void_seat_may_discard_anything_after_first_trick() {
    let h = hand(&["KD", "QS", "AH"]);
    let ctx = TrickContext {
        lead: Some(Suit::Clubs),
        first_trick: false,
        hearts_broken: false,
    };
    assert_eq!(legal_plays(&h, ctx), vec![0, 1, 2]);
}

#[test]
fn no_points_on_first_trick_with_an_alternative() {
    let h = hand(&["KD", "QS", "AH"]);
    let ctx = TrickContext {
        lead: Some(Suit::Clubs),
        first_trick: true,
        hearts_broken: false,
    };
    assert_eq!(
        kind_of(check_play(&h, 1, ctx)),
        Some(ValidationKind::NoPointsOnFirstTrick)
    );
    assert_eq!(
        kind_of(check_play(&h, 2, ctx)),
        Some(ValidationKind::NoPointsOnFirstTrick)
    );
    assert_eq!(legal_plays(&h, ctx), vec![0]);
}

#[test]
fn points_on_first_trick_when_nothing_else() {
    let h = hand(&["QS", "AH", "KH"]);
    let ctx = TrickContext {
        lead: Some(Suit::Clubs),
        first_trick: true,
        hearts_broken: false,
    };
    assert_eq!(legal_plays(&h, ctx), vec![0, 1, 2]);
}

#[test]
fn out_of_range_index_is_malformed() {
    let h = hand(&["2C"]);
    assert_eq!(
        kind_of(check_play(&h, 5, OPENING)),
        Some(ValidationKind::MalformedAnswer)
    );
}

#[test]
fn full_trick_goes_to_highest_led_suit_card() {
    let mut state = state_with_hands(
        [&["2C", "AD"], &["9C", "3D"], &["AH", "4D"], &["KC", "5D"]],
        0,
    );

    play_card(&mut state, 0, 0).unwrap();
    play_card(&mut state, 1, 0).unwrap();
    // South is void in clubs but this is the first trick and it has a diamond.
    let err = play_card(&mut state, 2, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::NoPointsOnFirstTrick));
    assert_eq!(state.current_trick.len(), 2);
    play_card(&mut state, 2, 0).unwrap();
    let result = play_card(&mut state, 3, 0).unwrap();

    let record = result.completed.expect("fourth card completes the trick");
    assert_eq!(record.winner, 3);
    assert_eq!(record.points, 0);
    assert_eq!(record.plays.len(), 4);
    assert_eq!(record.plays[0], (0, Card::TWO_OF_CLUBS));
    assert_eq!(state.leader, Some(3));
    assert_eq!(state.trick_no, 1);
    assert!(state.current_trick.is_empty());
    assert!(!state.hearts_broken);
}

#[test]
fn off_suit_heart_breaks_hearts_and_scores() {
    let mut state = state_with_hands(
        [&["3C", "AD"], &["9C", "3D"], &["AH", "4D"], &["KC", "5D"]],
        0,
    );
    state.trick_no = 1;

    play_card(&mut state, 0, 0).unwrap();
    play_card(&mut state, 1, 0).unwrap();
    let discard = play_card(&mut state, 2, 1).unwrap();
    assert_eq!(discard.card, Card::new(Rank::Ace, Suit::Hearts));
    assert!(discard.broke_hearts);
    assert!(state.hearts_broken);

    let done = play_card(&mut state, 3, 0).unwrap().completed.unwrap();
    assert_eq!(done.winner, 3);
    assert_eq!(done.points, 1);
    assert_eq!(state.seat(3).round_points, 1);
}

#[test]
fn queen_following_spades_keeps_hearts_unbroken() {
    let mut state = state_with_hands(
        [&["3S"], &["QS"], &["AS"], &["2S"]],
        0,
    );
    state.trick_no = 1;

    for seat in 0..4 {
        play_card(&mut state, seat, 0).unwrap();
    }
    assert!(!state.hearts_broken);
    assert_eq!(state.seat(2).round_points, 13);
    assert_eq!(state.leader, Some(2));
}

#[test]
fn out_of_turn_play_changes_nothing() {
    let mut state = state_with_hands(
        [&["2C", "AD"], &["9C", "3D"], &["AH", "4D"], &["KC", "5D"]],
        0,
    );
    let before = state.seat(1).hand.clone();
    assert!(play_card(&mut state, 1, 0).is_err());
    assert_eq!(state.seat(1).hand, before);
    assert!(state.current_trick.is_empty());
    assert_eq!(seat_to_play(&state), Some(0));
}

#[test]
fn heart_led_from_all_hearts_hand_keeps_hearts_unbroken() {
    let mut state = state_with_hands(
        [&["2H", "3H"], &["9H"], &["AH"], &["KH"]],
        0,
    );
    state.trick_no = 1;

    let lead = play_card(&mut state, 0, 0).unwrap();
    assert!(!lead.broke_hearts);
    for seat in 1..4 {
        assert!(!play_card(&mut state, seat, 0).unwrap().broke_hearts);
    }
    assert!(!state.hearts_broken);
    assert_eq!(state.seat(2).round_points, 4);
}
