//! Process-wide registries, created once at startup and injected everywhere.

use std::sync::Arc;

use actix::Addr;
use dashmap::DashMap;

use crate::config::server::{LobbyConfig, ServerConfig, SessionConfig};
use crate::lobby::{Lobby, LobbyState, LobbySummary};
use crate::ws::session::Session;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionRegistry {
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    pub fn insert(&self, session: Arc<Session>) {
        self.sessions.insert(session.id().to_string(), session);
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.remove(id).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

struct LobbyEntry {
    addr: Addr<Lobby>,
    summary: LobbySummary,
}

#[derive(Default)]
pub struct LobbyRegistry {
    lobbies: DashMap<String, LobbyEntry>,
}

impl LobbyRegistry {
    pub fn insert(&self, addr: Addr<Lobby>, summary: LobbySummary) {
        self.lobbies
            .insert(summary.id.clone(), LobbyEntry { addr, summary });
    }

    /// Refresh the listing entry; a removed lobby stays removed.
    pub fn update_summary(&self, summary: LobbySummary) {
        if let Some(mut entry) = self.lobbies.get_mut(&summary.id) {
            entry.summary = summary;
        }
    }

    pub fn addr(&self, id: &str) -> Option<Addr<Lobby>> {
        self.lobbies.get(id).map(|e| e.addr.clone())
    }

    pub fn summary(&self, id: &str) -> Option<LobbySummary> {
        self.lobbies.get(id).map(|e| e.summary.clone())
    }

    pub fn remove(&self, id: &str) {
        self.lobbies.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lobbies.contains_key(id)
    }

    /// Lobbies still accepting players, sorted by id for stable output.
    pub fn unstarted(&self) -> Vec<LobbySummary> {
        let mut open: Vec<LobbySummary> = self
            .lobbies
            .iter()
            .filter(|e| e.summary.state == LobbyState::InLobby)
            .map(|e| e.summary.clone())
            .collect();
        open.sort_by(|a, b| a.id.cmp(&b.id));
        open
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }
}

pub struct Hub {
    sessions: SessionRegistry,
    lobbies: LobbyRegistry,
    session_config: SessionConfig,
    lobby_config: LobbyConfig,
}

impl Hub {
    pub fn new(session_config: SessionConfig, lobby_config: LobbyConfig) -> Arc<Self> {
        Arc::new(Self {
            sessions: SessionRegistry::default(),
            lobbies: LobbyRegistry::default(),
            session_config,
            lobby_config,
        })
    }

    pub fn from_config(config: &ServerConfig) -> Arc<Self> {
        Self::new(config.session_config(), config.lobby_config())
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn lobbies(&self) -> &LobbyRegistry {
        &self.lobbies
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    pub fn lobby_config(&self) -> &LobbyConfig {
        &self.lobby_config
    }
}
