use crate::domain::test_state_helpers::{hand, state_with_hands};
use crate::domain::tricks::play_card;

#[test]
fn viewer_sees_only_own_hand() {
    let state = state_with_hands(
        [&["2C", "AD"], &["9C", "3D"], &["AH", "4D"], &["KC", "5D"]],
        0,
    );
    let view = state.view_for(2);

    assert_eq!(view.viewer_name, "south");
    assert_eq!(view.hand, hand(&["AH", "4D"]));
    assert_eq!(view.seat_order, vec!["north", "east", "south", "west"]);
    assert_eq!(view.per_seat["east"].num_cards, 2);
    assert!(view.per_seat["north"].is_lead);
    assert_eq!(view.leader(), Some("north"));
    assert!(view.first_trick);

    let json = serde_json::to_value(&view).unwrap();
    assert!(json.get("hand").is_some());
    assert!(json["perSeat"]["east"].get("hand").is_none());
    assert_eq!(json["perSeat"]["east"]["numCards"], 2);
    assert_eq!(json["passDirection"], "left");
}

#[test]
fn view_tracks_trick_in_progress() {
    let mut state = state_with_hands(
        [&["2C", "AD"], &["9C", "3D"], &["AH", "4D"], &["KC", "5D"]],
        0,
    );
    play_card(&mut state, 0, 0).unwrap();
    let view = state.view_for(1);

    assert_eq!(view.current_trick.len(), 1);
    assert_eq!(view.per_seat["north"].num_cards, 1);
    let ctx = view.trick_context();
    assert_eq!(ctx.lead, Some(crate::domain::Suit::Clubs));
    assert!(ctx.first_trick);
}

#[test]
fn final_view_names_the_loser() {
    let mut state = state_with_hands([&[], &[], &[], &[]], 0);
    state.seats[3].score = 104;
    let view = state.view_for(0);
    assert!(view.game_over);
    assert_eq!(view.loser.as_deref(), Some("west"));
}
