//! In-memory transport standing in for a websocket client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hearts::config::server::{LobbyConfig, SessionConfig};
use hearts::ws::connection::bind_session;
use hearts::ws::hub::Hub;
use hearts::ws::protocol::{Envelope, MessageCode};
use hearts::ws::session::{Connection, Session, SessionError};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use uuid::Uuid;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub fn test_hub(reply_timeout: Duration, watchdog_interval: Duration) -> Arc<Hub> {
    Hub::new(
        SessionConfig { reply_timeout },
        LobbyConfig {
            watchdog_interval,
            default_max_points: 100,
        },
    )
}

struct MemoryConnection {
    id: Uuid,
    tx: mpsc::UnboundedSender<String>,
    closed: AtomicBool,
}

impl Connection for MemoryConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    fn send_text(&self, text: String) -> Result<(), SessionError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SessionError::Closed);
        }
        self.tx.send(text).map_err(|_| SessionError::Closed)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// One client connection bound to a session.
///
/// With `auto_pong` set, pings from the server are answered in the
/// background and never show up in [`TestClient::recv`].
pub struct TestClient {
    pub session: Arc<Session>,
    pub conn_id: Uuid,
    inbox: mpsc::UnboundedReceiver<Envelope>,
}

impl TestClient {
    pub fn connect(hub: &Arc<Hub>, session_id: &str, auto_pong: bool) -> Self {
        let (tx, mut raw) = mpsc::unbounded_channel::<String>();
        let conn_id = Uuid::new_v4();
        let conn = Arc::new(MemoryConnection {
            id: conn_id,
            tx,
            closed: AtomicBool::new(false),
        });
        let session = bind_session(hub, session_id, conn);

        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        let pong_target = session.clone();
        tokio::spawn(async move {
            while let Some(text) = raw.recv().await {
                let Ok(env) = serde_json::from_str::<Envelope>(&text) else {
                    continue;
                };
                if auto_pong && env.code == MessageCode::Ping {
                    pong_target.dispatch(Envelope::with_id(env.id, MessageCode::Pong, Value::Null));
                    continue;
                }
                if inbox_tx.send(env).is_err() {
                    break;
                }
            }
        });

        Self {
            session,
            conn_id,
            inbox,
        }
    }

    pub fn send(&self, code: &str, content: Value) {
        let id = Uuid::new_v4().to_string();
        self.send_with_id(&id, code, content);
    }

    pub fn send_with_id(&self, id: &str, code: &str, content: Value) {
        let text = json!({ "id": id, "code": code, "content": content }).to_string();
        self.session.handle_text(&text);
    }

    pub async fn recv(&mut self) -> Envelope {
        tokio::time::timeout(RECV_TIMEOUT, self.inbox.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("connection closed")
    }

    /// Skip ahead to the next envelope with `code`.
    pub async fn expect(&mut self, code: MessageCode) -> Envelope {
        loop {
            let env = self.recv().await;
            if env.code == code {
                return env;
            }
        }
    }

    /// Nothing arrives within `wait`.
    pub async fn assert_quiet(&mut self, wait: Duration) {
        if let Ok(Some(env)) = tokio::time::timeout(wait, self.inbox.recv()).await {
            panic!("unexpected message: {env:?}");
        }
    }

    pub fn drain(&mut self) -> Vec<Envelope> {
        let mut out = Vec::new();
        while let Ok(env) = self.inbox.try_recv() {
            out.push(env);
        }
        out
    }
}
