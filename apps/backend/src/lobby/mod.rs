//! Lobby actor: seats, settings, game start, answer routing and teardown.
//!
//! Each lobby is one actix actor, so every lobby event is handled one at a
//! time from its mailbox. The running match lives on its own tokio task and
//! reaches the lobby only through the shared [`SeatSlot`](crate::players::SeatSlot)s.

mod actor;
pub mod messages;
pub mod seats;
mod watchdog;

use std::sync::Arc;

use actix::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::server::LobbyConfig;
use crate::domain::rules::PLAYERS;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::utils::join_code::generate_unique_lobby_id;
use crate::ws::hub::Hub;
use crate::ws::protocol::MessageCode;
use crate::ws::session::Session;

use self::seats::{add_seat, LobbySeat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyState {
    InLobby,
    InGame,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySettings {
    pub max_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub cpu: bool,
}

/// Content of `update_lobby` and of each `/lobby/list` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySummary {
    pub id: String,
    pub name: String,
    pub settings: LobbySettings,
    pub state: LobbyState,
    pub players: Vec<PlayerSummary>,
}

/// The match started from this lobby.
struct ActiveGame {
    cancel: CancellationToken,
    completed: bool,
}

pub struct Lobby {
    id: String,
    name: String,
    settings: LobbySettings,
    state: LobbyState,
    seats: Vec<LobbySeat>,
    hub: Arc<Hub>,
    config: LobbyConfig,
    game: Option<ActiveGame>,
    // A liveness probe is in flight.
    probing: bool,
}

impl Lobby {
    fn new(id: String, name: String, hub: Arc<Hub>, seats: Vec<LobbySeat>) -> Self {
        let config = *hub.lobby_config();
        Self {
            id,
            name,
            settings: LobbySettings {
                max_points: config.default_max_points,
            },
            state: LobbyState::InLobby,
            seats,
            hub,
            config,
            game: None,
            probing: false,
        }
    }

    /// Create a lobby with `session` in seat 0 and bind the session to it.
    ///
    /// The lobby is listed and addressable before this returns. The host
    /// seat follows the same rules as any joiner.
    pub fn host(
        hub: Arc<Hub>,
        session: Arc<Session>,
        nickname: String,
        lobby_name: String,
    ) -> Result<Addr<Lobby>, DomainError> {
        let mut seats = Vec::with_capacity(PLAYERS);
        add_seat(&mut seats, LobbySeat::human(nickname, session.clone()))?;
        let id = generate_unique_lobby_id(|candidate| !hub.lobbies().contains(candidate));
        let lobby = Lobby::new(id, lobby_name, hub.clone(), seats);
        let summary = lobby.summary();

        // Bind before the actor runs so a racing join to another lobby loses.
        let ctx: Context<Lobby> = Context::new();
        let addr = ctx.address();
        if !session.claim_lobby(addr.clone()) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadySeated,
                "You are already in another lobby",
            ));
        }
        hub.lobbies().insert(addr.clone(), summary);
        ctx.run(lobby);
        Ok(addr)
    }

    pub fn summary(&self) -> LobbySummary {
        LobbySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            settings: self.settings.clone(),
            state: self.state,
            players: self.seats.iter().map(LobbySeat::summary).collect(),
        }
    }

    fn human_sessions(&self) -> Vec<Arc<Session>> {
        self.seats
            .iter()
            .filter_map(|s| s.session().cloned())
            .collect()
    }

    /// Publish the listing entry and push `update_lobby` to every human seat.
    fn broadcast_summary(&self) {
        let summary = self.summary();
        self.hub.lobbies().update_summary(summary.clone());
        for session in self.human_sessions() {
            if let Err(err) = session.send_new(MessageCode::UpdateLobby, &summary) {
                debug!(lobby_id = %self.id, session_id = %session.id(), error = %err, "[LOBBY] update not delivered");
            }
        }
    }
}

impl Actor for Lobby {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(lobby_id = %self.id, name = %self.name, "[LOBBY] created");
        self.broadcast_summary();
        ctx.run_interval(self.config.watchdog_interval, |lobby, ctx| {
            lobby.watchdog_tick(ctx);
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(lobby_id = %self.id, "[LOBBY] stopped");
    }
}
