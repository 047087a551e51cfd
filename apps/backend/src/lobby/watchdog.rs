//! Periodic teardown check.

use actix::prelude::*;
use futures::future::join_all;
use tracing::info;

use super::{Lobby, LobbyState};

impl Lobby {
    /// Finish when the match is over or no human seat answers a ping.
    pub(super) fn watchdog_tick(&mut self, ctx: &mut Context<Self>) {
        if self.state == LobbyState::Finished || self.probing {
            return;
        }
        if self.game.as_ref().is_some_and(|g| g.completed) {
            return self.finish(ctx, "game completed");
        }

        let sessions = self.human_sessions();
        if sessions.is_empty() {
            return self.finish(ctx, "no human seats");
        }

        self.probing = true;
        let probe = async move {
            let checks = sessions.iter().map(|s| s.alive());
            join_all(checks).await.into_iter().any(|alive| alive)
        };
        ctx.spawn(probe.into_actor(self).map(|any_alive, lobby, ctx| {
            lobby.probing = false;
            if !any_alive {
                lobby.finish(ctx, "no reachable seats");
            }
        }));
    }

    /// Cancel the match, free every seat and drop out of the registry.
    pub(super) fn finish(&mut self, ctx: &mut Context<Self>, reason: &str) {
        if self.state == LobbyState::Finished {
            return;
        }
        self.state = LobbyState::Finished;

        if let Some(game) = &self.game {
            game.cancel.cancel();
        }
        for seat in &self.seats {
            if let Some(slot) = seat.slot() {
                slot.close();
            }
            if let Some(session) = seat.session() {
                session.release();
            }
        }
        self.hub.lobbies().remove(&self.id);
        info!(lobby_id = %self.id, reason, "[LOBBY] finished");
        ctx.stop();
    }
}
