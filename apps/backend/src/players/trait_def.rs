//! The seat-facing decision contract shared by CPU, websocket and terminal players.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::PlayerView;
use crate::errors::domain::{DomainError, ValidationKind};

/// What the engine can ask a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    /// Answer with exactly three distinct hand indices.
    PassCards,
    /// Answer with one hand index.
    PlayOnTrick,
}

/// A reply, keyed by the question it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    PassCards(Vec<usize>),
    PlayOnTrick(usize),
}

impl Answer {
    pub const fn question(&self) -> Question {
        match self {
            Answer::PassCards(_) => Question::PassCards,
            Answer::PlayOnTrick(_) => Question::PlayOnTrick,
        }
    }

    /// Decode a wire payload: `{"cards": [i, j, k]}` or `{"card": i}`.
    pub fn from_payload(question: Question, content: &Value) -> Result<Self, DomainError> {
        #[derive(Deserialize)]
        struct Cards {
            cards: Vec<usize>,
        }
        #[derive(Deserialize)]
        struct OneCard {
            card: usize,
        }

        let malformed =
            |_| DomainError::validation(ValidationKind::MalformedAnswer, "Could not understand answer");
        match question {
            Question::PassCards => Cards::deserialize(content)
                .map(|c| Answer::PassCards(c.cards))
                .map_err(malformed),
            Question::PlayOnTrick => OneCard::deserialize(content)
                .map(|c| Answer::PlayOnTrick(c.card))
                .map_err(malformed),
        }
    }
}

/// Errors a decider can surface instead of an answer.
#[derive(Debug, thiserror::Error)]
pub enum DecideError {
    /// The seat's answer channel was torn down before a reply arrived.
    #[error("seat disconnected")]
    Disconnected,
    #[error("decider internal error: {0}")]
    Internal(String),
}

/// One seat's decision-maker.
///
/// `decide` may suspend for as long as the participant needs; the engine
/// races it against match cancellation. The other three calls never block.
#[async_trait]
pub trait Decider: Send + Sync {
    fn name(&self) -> &str;

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError>;

    fn notify(&self, view: &PlayerView);

    fn show_info(&self, text: &str);
}
