//! Durable per-identity session: correlation, liveness and reconnect.
//!
//! A `Session` outlives any single websocket. The transport hands it text
//! frames through [`Session::handle_text`] and reports loss through
//! [`Session::connection_lost`]; everything else writes through the current
//! [`Connection`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix::Addr;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::lobby::messages::{Join, LobbyEvent, SessionReconnected};
use crate::lobby::Lobby;
use crate::ws::hub::Hub;
use crate::ws::protocol::{
    Envelope, ErrorMessage, HostGamePayload, JoinGamePayload, MessageCode, WireErrorCode,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("timed out waiting for reply")]
    Timeout,
    #[error("connection closed")]
    Closed,
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outbound half of one transport connection.
pub trait Connection: Send + Sync {
    fn id(&self) -> Uuid;

    fn send_text(&self, text: String) -> Result<(), SessionError>;

    /// Best-effort close frame.
    fn close(&self);
}

// Tombstones kept per session before the oldest generation is forgotten.
const MAX_TOMBSTONES: usize = 64;

enum PendingReply {
    Waiting(oneshot::Sender<Envelope>),
    /// The caller gave up; a late reply is dropped and the entry removed.
    Tombstone,
}

pub struct Session {
    id: String,
    hub: Arc<Hub>,
    // Held across the write so concurrent senders never interleave frames.
    conn: Mutex<Arc<dyn Connection>>,
    connected: AtomicBool,
    pending: Mutex<HashMap<String, PendingReply>>,
    lobby: Mutex<Option<Addr<Lobby>>>,
    reply_timeout: Duration,
}

impl Session {
    pub fn new(id: impl Into<String>, conn: Arc<dyn Connection>, hub: Arc<Hub>) -> Arc<Self> {
        let reply_timeout = hub.session_config().reply_timeout;
        Arc::new(Self {
            id: id.into(),
            hub,
            conn: Mutex::new(conn),
            connected: AtomicBool::new(true),
            pending: Mutex::new(HashMap::new()),
            lobby: Mutex::new(None),
            reply_timeout,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn lobby(&self) -> Option<Addr<Lobby>> {
        self.lobby.lock().clone()
    }

    /// Bind to `lobby` unless already bound to a different one.
    pub fn claim_lobby(&self, lobby: Addr<Lobby>) -> bool {
        let mut bound = self.lobby.lock();
        match bound.as_ref() {
            Some(current) if *current != lobby => false,
            _ => {
                *bound = Some(lobby);
                true
            }
        }
    }

    pub fn clear_lobby(&self) {
        self.lobby.lock().take();
    }

    /// Write one envelope, assigning a fresh id when it has none.
    pub fn send(&self, mut envelope: Envelope) -> Result<String, SessionError> {
        if envelope.id.is_empty() {
            envelope.id = Uuid::new_v4().to_string();
        }
        let text = serde_json::to_string(&envelope)?;
        let conn = self.conn.lock();
        conn.send_text(text)?;
        Ok(envelope.id)
    }

    pub fn send_new<T: Serialize>(&self, code: MessageCode, content: T) -> Result<String, SessionError> {
        let content = serde_json::to_value(content)?;
        self.send(Envelope::new(code, content))
    }

    pub fn reply<T: Serialize>(
        &self,
        request: &Envelope,
        code: MessageCode,
        content: T,
    ) -> Result<(), SessionError> {
        let content = serde_json::to_value(content)?;
        self.send(Envelope::with_id(request.id.clone(), code, content))
            .map(|_| ())
    }

    /// Fire-and-forget error reply.
    pub fn send_error(&self, code: WireErrorCode, text: impl Into<String>) {
        let msg = ErrorMessage {
            code,
            text: text.into(),
        };
        if let Err(err) = self.send_new(MessageCode::Error, msg) {
            debug!(session_id = %self.id, error = %err, "[WS SESSION] error reply not delivered");
        }
    }

    pub fn send_invalid_code(&self, code: &MessageCode) {
        self.send_error(
            WireErrorCode::InvalidMessageCode,
            format!("[{code}] is an invalid code"),
        );
    }

    /// Fire-and-forget human-facing text.
    pub fn send_info(&self, text: &str) {
        if let Err(err) = self.send_new(MessageCode::Info, text) {
            debug!(session_id = %self.id, error = %err, "[WS SESSION] info not delivered");
        }
    }

    /// Send a request and wait for the reply carrying the same id.
    ///
    /// On timeout the registration becomes a tombstone, so a late reply is
    /// discarded instead of reaching a future caller.
    pub async fn call(&self, code: MessageCode, content: Value) -> Result<Envelope, SessionError> {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .insert(id.clone(), PendingReply::Waiting(tx));

        if let Err(err) = self.send(Envelope::with_id(id.clone(), code, content)) {
            self.pending.lock().remove(&id);
            return Err(err);
        }

        match tokio::time::timeout(self.reply_timeout, rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(SessionError::Closed),
            Err(_) => {
                let mut pending = self.pending.lock();
                // A reply that landed after the deadline already took the entry.
                if let Entry::Occupied(mut entry) = pending.entry(id) {
                    entry.insert(PendingReply::Tombstone);
                }
                let tombstones = pending
                    .values()
                    .filter(|p| matches!(p, PendingReply::Tombstone))
                    .count();
                if tombstones > MAX_TOMBSTONES {
                    pending.retain(|_, p| matches!(p, PendingReply::Waiting(_)));
                }
                Err(SessionError::Timeout)
            }
        }
    }

    /// Ping round-trip within the reply timeout.
    pub async fn alive(&self) -> bool {
        self.call(MessageCode::Ping, Value::Null).await.is_ok()
    }

    /// Decode and route one inbound text frame.
    pub fn handle_text(self: &Arc<Self>, text: &str) {
        match serde_json::from_str::<Envelope>(text) {
            Ok(envelope) => self.dispatch(envelope),
            Err(err) => self.send_error(WireErrorCode::FailedDecoding, err.to_string()),
        }
    }

    /// Route by precedence: awaited reply, ping, active lobby, menu.
    pub fn dispatch(self: &Arc<Self>, envelope: Envelope) {
        let awaited = self.pending.lock().remove(&envelope.id);
        match awaited {
            Some(PendingReply::Waiting(tx)) => {
                // Receiver gone means the caller already stopped waiting.
                let _ = tx.send(envelope);
                return;
            }
            Some(PendingReply::Tombstone) => {
                debug!(session_id = %self.id, id = %envelope.id, "[WS SESSION] late reply dropped");
                return;
            }
            None => {}
        }

        if envelope.code == MessageCode::Ping {
            if let Err(err) = self.reply(&envelope, MessageCode::Pong, Value::Null) {
                debug!(session_id = %self.id, error = %err, "[WS SESSION] pong not delivered");
            }
            return;
        }

        if let Some(lobby) = self.lobby() {
            lobby.do_send(LobbyEvent {
                source: self.clone(),
                envelope,
            });
            return;
        }

        self.handle_menu(envelope);
    }

    fn handle_menu(self: &Arc<Self>, envelope: Envelope) {
        match envelope.code {
            MessageCode::HostGame => {
                let payload: HostGamePayload = match envelope.payload() {
                    Ok(p) => p,
                    Err(err) => return self.send_error(WireErrorCode::FailedDecoding, err.to_string()),
                };
                if let Err(err) = Lobby::host(
                    self.hub.clone(),
                    self.clone(),
                    payload.nickname,
                    payload.lobby_name,
                ) {
                    self.send_error(WireErrorCode::from(&err), err.detail());
                }
            }
            MessageCode::JoinGame => {
                let payload: JoinGamePayload = match envelope.payload() {
                    Ok(p) => p,
                    Err(err) => return self.send_error(WireErrorCode::FailedDecoding, err.to_string()),
                };
                match self.hub.lobbies().addr(&payload.lobby) {
                    Some(lobby) => lobby.do_send(Join {
                        session: self.clone(),
                        nickname: payload.nickname,
                    }),
                    None => {
                        let err = DomainError::not_found(
                            NotFoundKind::Lobby,
                            format!("[{}] is an invalid lobby ID", payload.lobby),
                        );
                        self.send_error(WireErrorCode::from(&err), err.detail());
                    }
                }
            }
            other => self.send_invalid_code(&other),
        }
    }

    fn forget_tombstones(&self) {
        self.pending
            .lock()
            .retain(|_, p| matches!(p, PendingReply::Waiting(_)));
    }

    /// Number of outstanding request ids, live or abandoned.
    pub fn pending_replies(&self) -> usize {
        self.pending.lock().len()
    }

    /// Swap in a new connection and let the lobby replay its state.
    pub fn reconnect(self: &Arc<Self>, conn: Arc<dyn Connection>) {
        let old = std::mem::replace(&mut *self.conn.lock(), conn);
        old.close();
        self.forget_tombstones();
        self.connected.store(true, Ordering::SeqCst);
        info!(session_id = %self.id, "[WS SESSION] reconnected");

        if let Some(lobby) = self.lobby() {
            lobby.do_send(SessionReconnected {
                session: self.clone(),
            });
        }
    }

    /// The connection `conn_id` stopped reading.
    ///
    /// Outside a lobby the session is torn down. Inside one the entry stays
    /// so a later connection with the same identity can resume it.
    pub fn connection_lost(&self, conn_id: Uuid) {
        let conn = self.conn.lock().clone();
        if conn.id() != conn_id {
            // Already replaced by a reconnect.
            return;
        }
        self.connected.store(false, Ordering::SeqCst);

        if self.lobby().is_some() {
            info!(session_id = %self.id, "[WS SESSION] connection lost, keeping seat");
            return;
        }
        self.hub.sessions().remove(&self.id);
        conn.close();
        info!(session_id = %self.id, "[WS SESSION] closed");
    }

    /// Drop the session from the registry if nothing can reach it any more.
    pub fn release(&self) {
        self.clear_lobby();
        if !self.is_connected() {
            self.hub.sessions().remove(&self.id);
            info!(session_id = %self.id, "[WS SESSION] released while disconnected");
        }
    }
}
