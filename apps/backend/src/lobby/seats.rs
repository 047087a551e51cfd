//! Seat list rules while a lobby is filling up.

use std::sync::Arc;

use crate::domain::rules::PLAYERS;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::players::{CpuPlayer, Decider, HumanPlayer, SeatSlot};
use crate::ws::session::Session;

use super::PlayerSummary;

#[derive(Clone)]
pub enum SeatKind {
    Cpu,
    Human {
        session: Arc<Session>,
        slot: Arc<SeatSlot>,
    },
}

#[derive(Clone)]
pub struct LobbySeat {
    pub name: String,
    pub kind: SeatKind,
}

impl LobbySeat {
    pub fn cpu(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Cpu,
        }
    }

    pub fn human(name: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Human {
                session,
                slot: SeatSlot::new(),
            },
        }
    }

    pub fn is_cpu(&self) -> bool {
        matches!(self.kind, SeatKind::Cpu)
    }

    pub fn session(&self) -> Option<&Arc<Session>> {
        match &self.kind {
            SeatKind::Human { session, .. } => Some(session),
            SeatKind::Cpu => None,
        }
    }

    pub fn slot(&self) -> Option<&Arc<SeatSlot>> {
        match &self.kind {
            SeatKind::Human { slot, .. } => Some(slot),
            SeatKind::Cpu => None,
        }
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            name: self.name.clone(),
            cpu: self.is_cpu(),
        }
    }

    /// The decider that plays this seat once the game starts.
    pub fn decider(&self) -> Arc<dyn Decider> {
        match &self.kind {
            SeatKind::Cpu => Arc::new(CpuPlayer::new(self.name.clone(), None)),
            SeatKind::Human { session, slot } => Arc::new(HumanPlayer::new(
                self.name.clone(),
                session.clone(),
                slot.clone(),
            )),
        }
    }
}

pub fn seat_for_session(seats: &[LobbySeat], session_id: &str) -> Option<usize> {
    seats
        .iter()
        .position(|s| s.session().is_some_and(|sess| sess.id() == session_id))
}

/// Append a seat; at most four, names unique and non-empty, one per session.
pub fn add_seat(seats: &mut Vec<LobbySeat>, seat: LobbySeat) -> Result<(), DomainError> {
    if let Some(session) = seat.session() {
        if seat_for_session(seats, session.id()).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadySeated,
                "You already have a seat in this lobby",
            ));
        }
    }
    if seats.len() >= PLAYERS {
        return Err(DomainError::conflict(ConflictKind::LobbyFull, "Lobby is full"));
    }
    if seat.name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSettings,
            "A seat needs a name",
        ));
    }
    if seats.iter().any(|s| s.name == seat.name) {
        return Err(DomainError::conflict(
            ConflictKind::NameTaken,
            format!("[{}] is already taken", seat.name),
        ));
    }
    seats.push(seat);
    Ok(())
}

/// Remove the CPU seat called `name`; a missing CPU is not an error.
pub fn remove_cpu(seats: &mut Vec<LobbySeat>, name: &str) {
    if let Some(i) = seats.iter().position(|s| s.is_cpu() && s.name == name) {
        seats.remove(i);
    }
}

pub fn swap_seats(seats: &mut [LobbySeat], a: usize, b: usize) -> Result<(), DomainError> {
    if a >= seats.len() || b >= seats.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSettings,
            format!("Cannot swap seats {a} and {b} with {} seated", seats.len()),
        ));
    }
    seats.swap(a, b);
    Ok(())
}
