use std::sync::Arc;

use actix::prelude::*;
use serde_json::json;
use tracing::{debug, info, warn};

use super::messages::{Join, LobbyEvent, SessionReconnected};
use super::seats::{add_seat, remove_cpu, seat_for_session, swap_seats, LobbySeat};
use super::{ActiveGame, Lobby, LobbyState};
use crate::domain::rules::PLAYERS;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::players::Answer;
use crate::services::game_flow::HeartsGame;
use crate::ws::protocol::{Envelope, MessageCode, SettingsUpdate, WireErrorCode};
use crate::ws::session::{Session, SessionError};

fn send_domain_error(session: &Session, err: &DomainError) {
    session.send_error(WireErrorCode::from(err), err.detail());
}

impl Lobby {
    fn handle_in_lobby(&mut self, source: &Arc<Session>, envelope: Envelope, ctx: &mut Context<Self>) {
        match &envelope.code {
            MessageCode::Refresh => {
                if let Err(err) = source.send_new(MessageCode::UpdateLobby, self.summary()) {
                    debug!(lobby_id = %self.id, error = %err, "[LOBBY] refresh not delivered");
                }
            }
            MessageCode::UpdateLobbySettings => {
                let update: SettingsUpdate = match envelope.payload() {
                    Ok(update) => update,
                    Err(err) => return source.send_error(WireErrorCode::FailedDecoding, err.to_string()),
                };
                match self.apply_settings(update) {
                    Ok(()) => self.broadcast_summary(),
                    Err(err) => send_domain_error(source, &err),
                }
            }
            MessageCode::StartGame => self.start_game(source, ctx),
            other => source.send_invalid_code(other),
        }
    }

    fn handle_in_game(&mut self, source: &Arc<Session>, envelope: Envelope) {
        let Some(seat) = seat_for_session(&self.seats, source.id()) else {
            return source.send_invalid_code(&envelope.code);
        };

        match &envelope.code {
            MessageCode::Refresh => match self.seats[seat].slot().and_then(|s| s.last_view()) {
                Some(view) => {
                    if let Err(err) = source.send_new(MessageCode::Update, &view) {
                        debug!(lobby_id = %self.id, error = %err, "[LOBBY] refresh not delivered");
                    }
                }
                None => source.send_info("Game is starting"),
            },
            code if code.answers().is_some() => self.route_answer(seat, source, &envelope),
            other => source.send_invalid_code(other),
        }
    }

    /// Hand a client reply to the seat's pending question.
    ///
    /// An undecodable payload keeps the question open and resends it.
    fn route_answer(&self, seat: usize, source: &Session, envelope: &Envelope) {
        let Some(slot) = self.seats[seat].slot() else {
            return;
        };
        let Some(question) = envelope.code.answers() else {
            return;
        };

        let pending = match slot.pending() {
            Some(p) if p.question == question => p,
            _ => {
                return source.send_error(
                    WireErrorCode::NoPendingQuestion,
                    format!("No {question:?} question is waiting for an answer"),
                )
            }
        };

        match Answer::from_payload(question, &envelope.content) {
            Ok(answer) => {
                if let Err(err) = slot.resolve(answer) {
                    send_domain_error(source, &err);
                }
            }
            Err(err) => {
                debug!(lobby_id = %self.id, seat, error = %err, "[LOBBY] undecodable answer");
                source.send_info(err.detail());
                if let Err(err) = source.send(pending.envelope()) {
                    debug!(lobby_id = %self.id, seat, error = %err, "[LOBBY] re-prompt not delivered");
                }
            }
        }
    }

    /// Validate the whole update against a copy, then commit it.
    fn apply_settings(&mut self, update: SettingsUpdate) -> Result<(), DomainError> {
        let mut settings = self.settings.clone();
        let mut seats = self.seats.clone();

        if let Some(max_points) = update.max_points {
            if max_points == 0 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    "max_points must be positive",
                ));
            }
            settings.max_points = max_points;
        }

        match (update.player_swap_index_1, update.player_swap_index_2) {
            (Some(a), Some(b)) => swap_seats(&mut seats, a, b)?,
            (None, None) => {}
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    "A swap needs both player_swap_index_1 and player_swap_index_2",
                ))
            }
        }

        if let Some(name) = update.add_cpu {
            add_seat(&mut seats, LobbySeat::cpu(name))?;
        }
        if let Some(name) = update.remove_cpu {
            remove_cpu(&mut seats, &name);
        }

        self.settings = settings;
        self.seats = seats;
        Ok(())
    }

    fn start_game(&mut self, source: &Session, ctx: &mut Context<Self>) {
        if self.seats.len() < PLAYERS {
            return source.send_info("Too few players");
        }
        if self.seats.len() > PLAYERS {
            return source.send_info("Too many players");
        }

        let deciders = self.seats.iter().map(LobbySeat::decider).collect();
        let game = match HeartsGame::new(deciders, self.settings.max_points) {
            Ok(game) => game,
            Err(err) => return send_domain_error(source, &err),
        };

        let running = game.start();
        self.game = Some(ActiveGame {
            cancel: running.cancel_token(),
            completed: false,
        });
        self.state = LobbyState::InGame;
        info!(lobby_id = %self.id, players = ?self.summary().players, "[LOBBY] game started");
        self.broadcast_summary();

        ctx.spawn(
            async move { running.wait().await }
                .into_actor(self)
                .map(|result, lobby, _ctx| {
                    match result {
                        Ok(outcome) => info!(
                            lobby_id = %lobby.id,
                            cancelled = outcome.cancelled(),
                            loser = ?outcome.loser(),
                            scores = ?outcome.scores(),
                            "[LOBBY] game completed"
                        ),
                        Err(err) => warn!(lobby_id = %lobby.id, error = %err, "[LOBBY] game task ended abnormally"),
                    }
                    if let Some(game) = lobby.game.as_mut() {
                        game.completed = true;
                    }
                }),
        );
    }

    /// Replay what a returning seat missed: marker, snapshot, open question.
    fn replay_for(&self, seat: usize, session: &Session) -> Result<(), SessionError> {
        session.send_new(
            MessageCode::Reconnected,
            json!({ "lobby": self.id, "state": self.state }),
        )?;
        let Some(slot) = self.seats[seat].slot() else {
            return Ok(());
        };
        match self.state {
            LobbyState::InLobby => {
                session.send_new(MessageCode::UpdateLobby, self.summary())?;
            }
            LobbyState::InGame => {
                if let Some(view) = slot.last_view() {
                    session.send_new(MessageCode::Update, &view)?;
                }
            }
            LobbyState::Finished => return Ok(()),
        }
        if let Some(prompt) = slot.pending() {
            session.send(prompt.envelope())?;
        }
        Ok(())
    }
}

impl Handler<LobbyEvent> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: LobbyEvent, ctx: &mut Self::Context) -> Self::Result {
        let LobbyEvent { source, envelope } = msg;
        match self.state {
            LobbyState::InLobby => self.handle_in_lobby(&source, envelope, ctx),
            LobbyState::InGame => self.handle_in_game(&source, envelope),
            LobbyState::Finished => {
                source.clear_lobby();
                source.send_error(
                    WireErrorCode::InvalidLobby,
                    format!("[{}] is an invalid lobby ID", self.id),
                );
            }
        }
    }
}

impl Handler<Join> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: Join, ctx: &mut Self::Context) -> Self::Result {
        let Join { session, nickname } = msg;
        if self.state != LobbyState::InLobby {
            let err = DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("[{}] is an invalid lobby ID", self.id),
            );
            return send_domain_error(&session, &err);
        }

        let seat = LobbySeat::human(nickname, session.clone());
        if let Err(err) = add_seat(&mut self.seats, seat) {
            return send_domain_error(&session, &err);
        }
        // A join that raced another join or a host_game from the same session.
        if !session.claim_lobby(ctx.address()) {
            self.seats.pop();
            let err = DomainError::conflict(
                ConflictKind::AlreadySeated,
                "You are already in another lobby",
            );
            return send_domain_error(&session, &err);
        }
        info!(lobby_id = %self.id, session_id = %session.id(), seats = self.seats.len(), "[LOBBY] joined");
        self.broadcast_summary();
    }
}

impl Handler<SessionReconnected> for Lobby {
    type Result = ();

    fn handle(&mut self, msg: SessionReconnected, _ctx: &mut Self::Context) -> Self::Result {
        match seat_for_session(&self.seats, msg.session.id()) {
            Some(seat) => {
                info!(lobby_id = %self.id, seat, "[LOBBY] seat reconnected");
                if let Err(err) = self.replay_for(seat, &msg.session) {
                    debug!(lobby_id = %self.id, seat, error = %err, "[LOBBY] reconnect replay not delivered");
                }
            }
            None => msg.session.clear_lobby(),
        }
    }
}
