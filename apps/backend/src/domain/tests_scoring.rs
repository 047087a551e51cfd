use proptest::prelude::*;

use crate::domain::rules::MOON_POINTS;
use crate::domain::scoring::{apply_round_scoring, round_deltas};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::fresh_state;

#[test]
fn plain_round_adds_own_points() {
    let (deltas, moon) = round_deltas([4, 13, 9, 0]);
    assert_eq!(deltas, [4, 13, 9, 0]);
    assert_eq!(moon, None);
}

#[test]
fn shooting_the_moon_charges_everyone_else() {
    let (deltas, moon) = round_deltas([0, 26, 0, 0]);
    assert_eq!(deltas, [26, 0, 26, 26]);
    assert_eq!(moon, Some(1));
}

#[test]
fn scoring_resets_round_points_and_records_history() {
    let mut state = fresh_state(100);
    state.round_no = 1;
    for (seat, pts) in state.seats.iter_mut().zip([26, 0, 0, 0]) {
        seat.round_points = pts;
        seat.score = 10;
    }

    let record = apply_round_scoring(&mut state);

    assert_eq!(record.shot_the_moon, Some(0));
    let scores: Vec<u32> = state.seats.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![10, 36, 36, 36]);
    assert!(state.seats.iter().all(|s| s.round_points == 0));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].round_no, 1);
}

#[test]
fn game_over_iff_cancelled_or_target_reached() {
    let mut state = fresh_state(50);
    assert!(!state.game_over());
    assert!(state.loser().is_none());

    state.seats[2].score = 49;
    assert!(!state.game_over());

    state.seats[2].score = 50;
    assert!(state.game_over());
    assert_eq!(state.loser().map(|s| s.name.as_str()), Some("south"));

    let mut cancelled = fresh_state(50);
    cancelled.cancelled = true;
    assert!(cancelled.game_over());
    assert!(cancelled.loser().is_none());
}

/// Random split of 26 points over four seats.
fn round_points() -> impl Strategy<Value = [u32; 4]> {
    (0u32..=26, 0u32..=26, 0u32..=26).prop_map(|(a, b, c)| {
        let mut cuts = [a, b, c];
        cuts.sort_unstable();
        [cuts[0], cuts[1] - cuts[0], cuts[2] - cuts[1], MOON_POINTS - cuts[2]]
    })
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Either 26 points are handed out as taken, or the shooter stays put and
    /// every other seat gains exactly 26.
    #[test]
    fn prop_round_scoring_conserves_or_shoots(points in round_points()) {
        let mut state = fresh_state(1000);
        for (seat, pts) in state.seats.iter_mut().zip(points) {
            seat.round_points = pts;
        }
        let before: Vec<u32> = state.seats.iter().map(|s| s.score).collect();
        let record = apply_round_scoring(&mut state);

        match record.shot_the_moon {
            Some(moon) => {
                prop_assert_eq!(points[moon], MOON_POINTS);
                for (i, seat) in state.seats.iter().enumerate() {
                    let gained = seat.score - before[i];
                    prop_assert_eq!(gained, if i == moon { 0 } else { MOON_POINTS });
                }
            }
            None => {
                prop_assert!(points.iter().all(|&p| p != MOON_POINTS));
                let awarded: u32 = record.score_delta.iter().sum();
                prop_assert_eq!(awarded, MOON_POINTS);
            }
        }
    }
}
