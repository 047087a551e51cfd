//! Domain-level error type used by the rules engine and the lobby.
//!
//! This error type is transport-agnostic. HTTP handlers convert it into
//! `crate::error::AppError`; the websocket layer maps it onto wire error
//! codes; the game driver turns validation failures into a re-prompt that
//! shows the detail string to the offending seat.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule or input violations. Each maps to a re-prompt, never to a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    EmptyDeck,
    ParseCard,
    MalformedAnswer,
    MustLeadTwoOfClubs,
    HeartsNotBroken,
    MustFollowSuit,
    NoPointsOnFirstTrick,
    InvalidSeatCount,
    DuplicateName,
    InvalidSettings,
    Other,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Lobby,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    LobbyFull,
    NameTaken,
    AlreadyStarted,
    AlreadySeated,
    NoPendingQuestion,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with the current lobby/game state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// The human-readable part, without the kind prefix.
    ///
    /// This is what gets shown to a player before a re-prompt.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }

    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            _ => None,
        }
    }
}
