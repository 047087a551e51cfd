//! Session-backed seat: prompts go out over the websocket and the lobby
//! routes the reply back through the seat's [`SeatSlot`].

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use super::trait_def::{Answer, DecideError, Decider, Question};
use crate::domain::PlayerView;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::ws::protocol::{Envelope, MessageCode};
use crate::ws::session::Session;

/// The question a seat still owes an answer to, kept as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    pub question: Question,
    pub prompt_id: String,
}

impl PendingPrompt {
    pub fn envelope(&self) -> Envelope {
        Envelope::with_id(
            self.prompt_id.clone(),
            MessageCode::prompt_for(self.question),
            Value::Null,
        )
    }
}

struct PendingAsk {
    prompt: PendingPrompt,
    reply: oneshot::Sender<Answer>,
}

#[derive(Default)]
struct SlotInner {
    pending: Option<PendingAsk>,
    last_view: Option<PlayerView>,
}

/// One seat's answer channel and cached snapshot.
///
/// Holds at most one outstanding answer channel; asking again drops the old
/// one.
#[derive(Default)]
pub struct SeatSlot {
    inner: Mutex<SlotInner>,
}

impl SeatSlot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record `question` as outstanding and hand back the receiving end.
    pub fn ask(&self, question: Question) -> (PendingPrompt, oneshot::Receiver<Answer>) {
        let (tx, rx) = oneshot::channel();
        let prompt = PendingPrompt {
            question,
            prompt_id: Uuid::new_v4().to_string(),
        };
        self.inner.lock().pending = Some(PendingAsk {
            prompt: prompt.clone(),
            reply: tx,
        });
        (prompt, rx)
    }

    /// Deliver a reply to the outstanding question.
    ///
    /// `None` or a reply for a different question fails without consuming
    /// anything.
    pub fn resolve(&self, answer: Answer) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        match inner.pending.take() {
            Some(ask) if ask.prompt.question == answer.question() => {
                ask.reply.send(answer).map_err(|_| {
                    DomainError::conflict(ConflictKind::NoPendingQuestion, "The question was withdrawn")
                })
            }
            other => {
                inner.pending = other;
                Err(DomainError::conflict(
                    ConflictKind::NoPendingQuestion,
                    "There is no question waiting for that answer",
                ))
            }
        }
    }

    pub fn pending(&self) -> Option<PendingPrompt> {
        self.inner.lock().pending.as_ref().map(|p| p.prompt.clone())
    }

    /// Drop any outstanding channel; the waiting decider sees `Disconnected`.
    pub fn close(&self) {
        self.inner.lock().pending.take();
    }

    pub fn cache_view(&self, view: PlayerView) {
        self.inner.lock().last_view = Some(view);
    }

    pub fn last_view(&self) -> Option<PlayerView> {
        self.inner.lock().last_view.clone()
    }
}

pub struct HumanPlayer {
    name: String,
    session: Arc<Session>,
    slot: Arc<SeatSlot>,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>, session: Arc<Session>, slot: Arc<SeatSlot>) -> Self {
        Self {
            name: name.into(),
            session,
            slot,
        }
    }

    fn push_view(&self, view: &PlayerView) {
        self.slot.cache_view(view.clone());
        if let Err(err) = self.session.send_new(MessageCode::Update, view) {
            // The cached view is replayed on reconnect.
            debug!(seat = %self.name, error = %err, "[SEAT] update not delivered");
        }
    }
}

#[async_trait]
impl Decider for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError> {
        self.push_view(view);
        let (prompt, rx) = self.slot.ask(question);
        if let Err(err) = self.session.send(prompt.envelope()) {
            warn!(
                seat = %self.name,
                session_id = %self.session.id(),
                error = %err,
                "[SEAT] prompt not delivered, waiting for reconnect"
            );
        }
        rx.await.map_err(|_| DecideError::Disconnected)
    }

    fn notify(&self, view: &PlayerView) {
        self.push_view(view);
    }

    fn show_info(&self, text: &str) {
        self.session.send_info(text);
    }
}
