//! Websocket transport: one actor per connection, bound to a durable [`Session`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::cookie::Cookie;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::app_state::AppState;
use crate::ws::hub::Hub;
use crate::ws::session::{Connection, Session, SessionError};

pub const SESSION_COOKIE: &str = "session";

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Message)]
#[rtype(result = "()")]
struct Outbound(String);

#[derive(Message)]
#[rtype(result = "()")]
struct CloseConnection;

#[derive(Message)]
#[rtype(result = "()")]
struct Attach(Arc<Session>);

/// [`Connection`] handle that forwards writes into the actor's mailbox.
struct ActorConnection {
    id: Uuid,
    addr: Addr<WsConnection>,
}

impl Connection for ActorConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    fn send_text(&self, text: String) -> Result<(), SessionError> {
        if !self.addr.connected() {
            return Err(SessionError::Closed);
        }
        self.addr.do_send(Outbound(text));
        Ok(())
    }

    fn close(&self) {
        self.addr.do_send(CloseConnection);
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let hub = app_state.hub.clone();
    let existing = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    let session_id = existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let conn_id = Uuid::new_v4();
    let actor = WsConnection::new(conn_id, session_id.clone());
    let (addr, mut response) = ws::WsResponseBuilder::new(actor, &req, stream).start_with_addr()?;

    let conn: Arc<dyn Connection> = Arc::new(ActorConnection {
        id: conn_id,
        addr: addr.clone(),
    });
    let session = bind_session(&hub, &session_id, conn);
    addr.do_send(Attach(session));

    if existing.is_none() {
        let cookie = Cookie::build(SESSION_COOKIE, session_id).path("/").finish();
        if let Err(err) = response.add_cookie(&cookie) {
            warn!(error = %err, "[WS] failed to set session cookie");
        }
    }
    Ok(response)
}

/// Resume the session known under `session_id`, or register a new one.
pub fn bind_session(hub: &Arc<Hub>, session_id: &str, conn: Arc<dyn Connection>) -> Arc<Session> {
    match hub.sessions().get(session_id) {
        Some(session) => {
            session.reconnect(conn);
            session
        }
        None => {
            let session = Session::new(session_id, conn, hub.clone());
            hub.sessions().insert(session.clone());
            info!(session_id, "[WS] new session");
            session
        }
    }
}

pub struct WsConnection {
    conn_id: Uuid,
    session_id: String,
    session: Option<Arc<Session>>,
    // Frames that arrived before the session was attached.
    backlog: Vec<String>,
    last_heartbeat: Instant,
}

impl WsConnection {
    fn new(conn_id: Uuid, session_id: String) -> Self {
        Self {
            conn_id,
            session_id,
            session: None,
            backlog: Vec::new(),
            last_heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(session_id = %actor.session_id, conn_id = %actor.conn_id, "[WS] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn on_text(&mut self, text: String) {
        match &self.session {
            Some(session) => session.handle_text(&text),
            None => self.backlog.push(text),
        }
    }
}

impl Actor for WsConnection {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(session_id = %self.session_id, conn_id = %self.conn_id, "[WS] connection started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(session) = self.session.take() {
            session.connection_lost(self.conn_id);
        }
        info!(session_id = %self.session_id, conn_id = %self.conn_id, "[WS] connection stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsConnection {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.on_text(text.to_string());
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "[WS] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Attach> for WsConnection {
    type Result = ();

    fn handle(&mut self, msg: Attach, _ctx: &mut Self::Context) -> Self::Result {
        let session = msg.0;
        for text in self.backlog.drain(..) {
            session.handle_text(&text);
        }
        self.session = Some(session);
    }
}

impl Handler<Outbound> for WsConnection {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0);
    }
}

impl Handler<CloseConnection> for WsConnection {
    type Result = ();

    fn handle(&mut self, _msg: CloseConnection, ctx: &mut Self::Context) -> Self::Result {
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
        ctx.stop();
    }
}
