//! Asking one seat a question, with cancellation and local re-prompts.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::RoundAbort;
use crate::domain::passing::check_pass;
use crate::domain::PlayerView;
use crate::players::{Answer, DecideError, Decider, Question};

pub(crate) const MALFORMED: &str = "Could not understand answer";

/// Race one `decide` call against match cancellation.
///
/// Internal decider failures count as a malformed answer: the seat is told
/// and asked again. A disconnected seat parks until the match is cancelled.
pub(crate) async fn ask(
    decider: &dyn Decider,
    question: Question,
    view: &PlayerView,
    cancel: &CancellationToken,
) -> Result<Answer, RoundAbort> {
    loop {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RoundAbort::Cancelled),
            res = decider.decide(question, view) => res,
        };
        match outcome {
            Ok(answer) => return Ok(answer),
            Err(DecideError::Internal(msg)) => {
                warn!(seat = decider.name(), ?question, error = %msg, "[GAME] decider failed, asking again");
                decider.show_info(MALFORMED);
            }
            Err(DecideError::Disconnected) => {
                debug!(seat = decider.name(), "[GAME] seat disconnected, waiting for cancellation");
                cancel.cancelled().await;
                return Err(RoundAbort::Cancelled);
            }
        }
    }
}

/// Ask until the seat names exactly three distinct cards of its hand.
pub(crate) async fn ask_pass(
    decider: Arc<dyn Decider>,
    view: PlayerView,
    cancel: CancellationToken,
) -> Result<Vec<usize>, RoundAbort> {
    loop {
        match ask(decider.as_ref(), Question::PassCards, &view, &cancel).await? {
            Answer::PassCards(indices) => match check_pass(&view.hand, &indices) {
                Ok(()) => return Ok(indices),
                Err(err) => decider.show_info(err.detail()),
            },
            Answer::PlayOnTrick(_) => decider.show_info(MALFORMED),
        }
    }
}
