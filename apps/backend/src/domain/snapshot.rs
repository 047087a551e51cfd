//! Per-viewer projection of the match; other seats' hands appear only as counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::deck::Deck;
use crate::domain::passing::PassDirection;
use crate::domain::state::{GameState, SeatIndex};
use crate::domain::tricks::TrickContext;

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfo {
    pub name: String,
    pub num_cards: usize,
    pub score: u32,
    pub round_points: u32,
    pub is_lead: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub viewer_name: String,
    pub per_seat: BTreeMap<String, SeatInfo>,
    pub seat_order: Vec<String>,
    pub pass_direction: PassDirection,
    pub current_trick: Deck,
    pub hearts_broken: bool,
    pub max_points: u32,
    /// The viewer's own hand, in sorted order until cards leave it.
    pub hand: Deck,
    pub first_trick: bool,
    pub round_no: u32,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser: Option<String>,
}

impl PlayerView {
    pub fn trick_context(&self) -> TrickContext {
        TrickContext {
            lead: self.current_trick.first().map(|c| c.suit),
            first_trick: self.first_trick,
            hearts_broken: self.hearts_broken,
        }
    }

    pub fn leader(&self) -> Option<&str> {
        self.per_seat
            .values()
            .find(|s| s.is_lead)
            .map(|s| s.name.as_str())
    }
}

impl GameState {
    /// Snapshot as seen from `viewer`.
    pub fn view_for(&self, viewer: SeatIndex) -> PlayerView {
        let per_seat = self
            .seats
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let info = SeatInfo {
                    name: s.name.clone(),
                    num_cards: s.hand.len(),
                    score: s.score,
                    round_points: s.round_points,
                    is_lead: self.leader == Some(i),
                };
                (s.name.clone(), info)
            })
            .collect();

        let me = self.seat(viewer);
        PlayerView {
            viewer_name: me.name.clone(),
            per_seat,
            seat_order: self.seat_order(),
            pass_direction: self.pass_direction,
            current_trick: self.current_trick.clone(),
            hearts_broken: self.hearts_broken,
            max_points: self.max_points,
            hand: me.hand.clone(),
            first_trick: self.is_first_trick(),
            round_no: self.round_no,
            game_over: self.game_over(),
            loser: self.loser().map(|s| s.name.clone()),
        }
    }
}
