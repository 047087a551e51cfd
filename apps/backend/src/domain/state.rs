use std::collections::HashSet;

use crate::domain::deck::Deck;
use crate::domain::passing::PassDirection;
use crate::domain::rules::PLAYERS;
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Position in seating order (0..=3).
pub type SeatIndex = usize;

/// One named seat: the hand it holds and its scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSeat {
    pub name: String,
    pub hand: Deck,
    /// Cumulative across rounds; never decreases.
    pub score: u32,
    /// Points taken in tricks so far this round.
    pub round_points: u32,
}

impl PlayerSeat {
    fn new(name: String) -> Self {
        Self {
            name,
            hand: Deck::empty(),
            score: 0,
            round_points: 0,
        }
    }
}

/// One completed trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickRecord {
    pub leader: SeatIndex,
    /// In play order, starting with the leader.
    pub plays: Vec<(SeatIndex, Card)>,
    pub winner: SeatIndex,
    pub points: u32,
}

/// Summary of a fully scored round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round_no: u32,
    /// Direction cards moved this round (`None` for a hold round).
    pub pass_direction: PassDirection,
    pub tricks: Vec<TrickRecord>,
    pub round_points: [u32; PLAYERS],
    pub score_delta: [u32; PLAYERS],
    pub shot_the_moon: Option<SeatIndex>,
}

/// Entire match container, owned by the game driver for its whole life.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seats in seating order.
    pub seats: [PlayerSeat; PLAYERS],
    /// Direction for the next pass phase.
    pub pass_direction: PassDirection,
    /// Cards played into the trick in progress, in play order (0..=4).
    pub current_trick: Deck,
    /// Once set, stays set for the rest of the match.
    pub hearts_broken: bool,
    pub max_points: u32,
    /// Seat leading the trick in progress.
    pub leader: Option<SeatIndex>,
    pub cancelled: bool,
    /// 1-based; 0 before the first deal.
    pub round_no: u32,
    /// Completed tricks in the current round; 0 means the first trick.
    pub trick_no: usize,
    /// Direction actually used for the round in progress.
    pub round_pass: PassDirection,
    pub round_tricks: Vec<TrickRecord>,
    pub history: Vec<RoundRecord>,
}

impl GameState {
    /// Build a match for four uniquely named seats.
    pub fn new(names: Vec<String>, max_points: u32) -> Result<Self, DomainError> {
        if names.len() != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeatCount,
                format!("A game needs exactly {PLAYERS} seats, got {}", names.len()),
            ));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicateName,
                    format!("Seat name [{name}] is used twice"),
                ));
            }
        }
        let seats: [PlayerSeat; PLAYERS] = names
            .into_iter()
            .map(PlayerSeat::new)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                DomainError::validation(ValidationKind::InvalidSeatCount, "Seat count changed")
            })?;

        Ok(Self {
            seats,
            pass_direction: PassDirection::Left,
            current_trick: Deck::empty(),
            hearts_broken: false,
            max_points,
            leader: None,
            cancelled: false,
            round_no: 0,
            trick_no: 0,
            round_pass: PassDirection::Left,
            round_tricks: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn seat(&self, seat: SeatIndex) -> &PlayerSeat {
        &self.seats[seat % PLAYERS]
    }

    pub fn seat_mut(&mut self, seat: SeatIndex) -> &mut PlayerSeat {
        &mut self.seats[seat % PLAYERS]
    }

    pub fn seat_index(&self, name: &str) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.name == name)
    }

    pub fn seat_order(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.name.clone()).collect()
    }

    /// First seat in seating order at or over the score target.
    pub fn loser(&self) -> Option<&PlayerSeat> {
        self.seats.iter().find(|s| s.score >= self.max_points)
    }

    pub fn game_over(&self) -> bool {
        self.cancelled || self.loser().is_some()
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.current_trick.first().map(|c| c.suit)
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_no == 0
    }

    /// Install freshly dealt hands and reset per-round bookkeeping.
    pub fn begin_round(&mut self, hands: [Deck; PLAYERS]) {
        self.round_no += 1;
        self.trick_no = 0;
        self.round_pass = self.pass_direction;
        self.round_tricks.clear();
        self.current_trick.clear();
        self.leader = None;
        for (seat, hand) in self.seats.iter_mut().zip(hands) {
            seat.hand = hand;
            seat.round_points = 0;
        }
    }

    /// Holder of the Two of Clubs; seat 0 if nobody holds it.
    pub fn opening_leader(&self) -> SeatIndex {
        self.seats
            .iter()
            .position(|s| s.hand.contains(Card::TWO_OF_CLUBS.rank, Card::TWO_OF_CLUBS.suit))
            .unwrap_or(0)
    }
}
