//! Wire envelope and payloads for the game websocket.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::players::Question;

/// `{id, code, content}`; `id` correlates a reply with its request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub id: String,
    pub code: MessageCode,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
}

impl Envelope {
    pub fn new(code: MessageCode, content: Value) -> Self {
        Self {
            id: String::new(),
            code,
            content,
        }
    }

    pub fn with_id(id: impl Into<String>, code: MessageCode, content: Value) -> Self {
        Self {
            id: id.into(),
            code,
            content,
        }
    }

    /// Decode `content` into a typed payload.
    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageCode {
    // Both directions
    Error,
    Ping,
    Pong,

    // Client to server
    HostGame,
    JoinGame,
    Refresh,
    UpdateLobbySettings,
    StartGame,
    PassedCards,
    PlayedCard,

    // Server to client
    Info,
    UpdateLobby,
    Update,
    PassCards,
    PlayCard,
    Reconnected,

    /// Anything else; kept verbatim so it can be echoed in the error reply.
    Unknown(String),
}

impl MessageCode {
    pub fn as_str(&self) -> &str {
        match self {
            MessageCode::Error => "error",
            MessageCode::Ping => "ping",
            MessageCode::Pong => "pong",
            MessageCode::HostGame => "host_game",
            MessageCode::JoinGame => "join_game",
            MessageCode::Refresh => "refresh",
            MessageCode::UpdateLobbySettings => "update_lobby_settings",
            MessageCode::StartGame => "start_game",
            MessageCode::PassedCards => "passed_cards",
            MessageCode::PlayedCard => "played_card",
            MessageCode::Info => "info",
            MessageCode::UpdateLobby => "update_lobby",
            MessageCode::Update => "update",
            MessageCode::PassCards => "pass_cards",
            MessageCode::PlayCard => "play_card",
            MessageCode::Reconnected => "reconnected",
            MessageCode::Unknown(code) => code,
        }
    }

    /// Prompt sent to a seat for `question`.
    pub const fn prompt_for(question: Question) -> Self {
        match question {
            Question::PassCards => MessageCode::PassCards,
            Question::PlayOnTrick => MessageCode::PlayCard,
        }
    }

    /// The question a client reply code answers, if it is one.
    pub const fn answers(&self) -> Option<Question> {
        match self {
            MessageCode::PassedCards => Some(Question::PassCards),
            MessageCode::PlayedCard => Some(Question::PlayOnTrick),
            _ => None,
        }
    }
}

impl From<String> for MessageCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "error" => MessageCode::Error,
            "ping" => MessageCode::Ping,
            "pong" => MessageCode::Pong,
            "host_game" => MessageCode::HostGame,
            "join_game" => MessageCode::JoinGame,
            "refresh" => MessageCode::Refresh,
            "update_lobby_settings" => MessageCode::UpdateLobbySettings,
            "start_game" => MessageCode::StartGame,
            "passed_cards" => MessageCode::PassedCards,
            "played_card" => MessageCode::PlayedCard,
            "info" => MessageCode::Info,
            "update_lobby" => MessageCode::UpdateLobby,
            "update" => MessageCode::Update,
            "pass_cards" => MessageCode::PassCards,
            "play_card" => MessageCode::PlayCard,
            "reconnected" => MessageCode::Reconnected,
            _ => MessageCode::Unknown(code),
        }
    }
}

impl From<MessageCode> for String {
    fn from(code: MessageCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason carried by an `error` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireErrorCode {
    FailedDecoding,
    InvalidMessageCode,
    InvalidLobby,
    LobbyFull,
    NameTaken,
    InvalidSettings,
    NoPendingQuestion,
}

impl From<&DomainError> for WireErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Conflict(ConflictKind::LobbyFull, _) => WireErrorCode::LobbyFull,
            DomainError::Conflict(ConflictKind::NameTaken, _) => WireErrorCode::NameTaken,
            DomainError::Conflict(ConflictKind::NoPendingQuestion, _) => {
                WireErrorCode::NoPendingQuestion
            }
            DomainError::Conflict(ConflictKind::AlreadyStarted, _)
            | DomainError::Conflict(ConflictKind::AlreadySeated, _)
            | DomainError::NotFound(NotFoundKind::Lobby, _) => WireErrorCode::InvalidLobby,
            DomainError::Validation(ValidationKind::MalformedAnswer, _) => {
                WireErrorCode::FailedDecoding
            }
            _ => WireErrorCode::InvalidSettings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub code: WireErrorCode,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostGamePayload {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub lobby_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinGamePayload {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub lobby: String,
}

/// Partial lobby settings update; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsUpdate {
    pub max_points: Option<u32>,
    pub player_swap_index_1: Option<usize>,
    pub player_swap_index_2: Option<usize>,
    pub add_cpu: Option<String>,
    pub remove_cpu: Option<String>,
}
