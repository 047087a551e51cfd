use std::sync::Arc;

use actix::prelude::*;

use crate::ws::protocol::Envelope;
use crate::ws::session::Session;

/// An inbound envelope from a session already bound to this lobby.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LobbyEvent {
    pub source: Arc<Session>,
    pub envelope: Envelope,
}

/// A session asking for a seat.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Join {
    pub session: Arc<Session>,
    pub nickname: String,
}

/// A seated session came back on a new connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionReconnected {
    pub session: Arc<Session>,
}
