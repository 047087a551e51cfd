use crate::domain::rules::{MOON_POINTS, PLAYERS};
use crate::domain::state::{GameState, RoundRecord, SeatIndex};

/// Score change per seat for one round's trick points.
///
/// A seat that took all 26 points shot the moon: everyone else gains 26 and
/// the shooter gains nothing.
pub fn round_deltas(round_points: [u32; PLAYERS]) -> ([u32; PLAYERS], Option<SeatIndex>) {
    let shooter = round_points.iter().position(|&p| p == MOON_POINTS);
    match shooter {
        Some(moon) => {
            let mut deltas = [MOON_POINTS; PLAYERS];
            deltas[moon] = 0;
            (deltas, Some(moon))
        }
        None => (round_points, None),
    }
}

/// Fold round points into cumulative scores, reset them, and record the round.
pub fn apply_round_scoring(state: &mut GameState) -> RoundRecord {
    let round_points: [u32; PLAYERS] = std::array::from_fn(|i| state.seats[i].round_points);
    let (score_delta, shot_the_moon) = round_deltas(round_points);

    for (seat, delta) in state.seats.iter_mut().zip(score_delta) {
        seat.score += delta;
        seat.round_points = 0;
    }

    let record = RoundRecord {
        round_no: state.round_no,
        pass_direction: state.round_pass,
        tricks: std::mem::take(&mut state.round_tricks),
        round_points,
        score_delta,
        shot_the_moon,
    };
    state.history.push(record.clone());
    record
}
