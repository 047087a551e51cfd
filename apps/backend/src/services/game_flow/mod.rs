//! Async driver for one Hearts match: rounds, pass fan-out, sequential tricks.
//!
//! The driver owns the [`GameState`] for the whole match. Deciders only ever
//! see per-seat [`PlayerView`](crate::domain::PlayerView) snapshots.

mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::domain::rules::PLAYERS;
use crate::domain::{GameState, RoundRecord};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::players::Decider;

/// Why a round stopped before scoring.
#[derive(Debug)]
pub(crate) enum RoundAbort {
    Cancelled,
    Failed(DomainError),
}

impl From<DomainError> for RoundAbort {
    fn from(err: DomainError) -> Self {
        RoundAbort::Failed(err)
    }
}

/// Final state handed back when a match ends.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub state: GameState,
}

impl GameOutcome {
    pub fn cancelled(&self) -> bool {
        self.state.cancelled
    }

    pub fn loser(&self) -> Option<&str> {
        self.state.loser().map(|s| s.name.as_str())
    }

    pub fn scores(&self) -> [u32; PLAYERS] {
        std::array::from_fn(|i| self.state.seats[i].score)
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.state.history
    }
}

pub struct HeartsGame {
    state: GameState,
    deciders: Vec<Arc<dyn Decider>>,
    cancel: CancellationToken,
    rng: StdRng,
}

impl HeartsGame {
    /// Seat four deciders in the given order; names must be unique.
    pub fn new(deciders: Vec<Arc<dyn Decider>>, max_points: u32) -> Result<Self, DomainError> {
        if max_points == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "max points must be greater than 0",
            ));
        }
        let names = deciders.iter().map(|d| d.name().to_string()).collect();
        let state = GameState::new(names, max_points)?;
        Ok(Self {
            state,
            deciders,
            cancel: CancellationToken::new(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Reproducible deals.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Launch the match on the tokio runtime.
    pub fn start(self) -> RunningGame {
        let cancel = self.cancel.clone();
        let handle = tokio::spawn(self.run());
        RunningGame { cancel, handle }
    }

    /// Play rounds until someone reaches the target or the match is cancelled,
    /// then notify every seat once more.
    pub async fn run(mut self) -> GameOutcome {
        info!(seats = ?self.state.seat_order(), max_points = self.state.max_points, "[GAME] started");

        while !self.state.game_over() {
            if self.cancel.is_cancelled() {
                self.state.cancelled = true;
                break;
            }
            match self.play_round().await {
                Ok(()) => {}
                Err(RoundAbort::Cancelled) => {
                    info!(round_no = self.state.round_no, "[GAME] cancelled mid-round");
                    self.state.cancelled = true;
                }
                Err(RoundAbort::Failed(err)) => {
                    error!(round_no = self.state.round_no, error = %err, "[GAME] round failed, ending match");
                    self.state.cancelled = true;
                    self.cancel.cancel();
                }
            }
        }

        self.notify_all();
        info!(
            cancelled = self.state.cancelled,
            loser = ?self.state.loser().map(|s| s.name.clone()),
            rounds = self.state.history.len(),
            "[GAME] finished"
        );
        GameOutcome { state: self.state }
    }

    fn notify_all(&self) {
        for (seat, decider) in self.deciders.iter().enumerate() {
            decider.notify(&self.state.view_for(seat));
        }
    }
}

/// Handle to a match running on its own task.
pub struct RunningGame {
    cancel: CancellationToken,
    handle: JoinHandle<GameOutcome>,
}

impl RunningGame {
    /// Abort the match; every suspended question observes the same signal.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Completion signal; resolves exactly once with the final state.
    pub async fn wait(self) -> Result<GameOutcome, AppError> {
        self.handle
            .await
            .map_err(|e| AppError::internal(format!("game task failed: {e}")))
    }
}
