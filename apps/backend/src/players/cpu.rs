//! Random CPU seat: answers immediately and never suspends.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;
use tracing::debug;

use super::trait_def::{Answer, DecideError, Decider, Question};
use crate::domain::rules::PASS_COUNT;
use crate::domain::tricks::legal_plays;
use crate::domain::PlayerView;

/// CPU seat that picks uniformly at random.
///
/// Plays are drawn from the legal set, so the opening lead is always the
/// Two of Clubs. The engine still validates every answer it returns.
pub struct CpuPlayer {
    name: String,
    // `Decider` methods take `&self`; the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl CpuPlayer {
    /// `seed` makes the choices reproducible; `None` draws from OS entropy.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            name: name.into(),
            rng: Mutex::new(rng),
        }
    }

    fn pick_pass(&self, hand_len: usize) -> Result<Vec<usize>, DecideError> {
        if hand_len < PASS_COUNT {
            return Err(DecideError::Internal(format!(
                "Cannot pass {PASS_COUNT} cards from a hand of {hand_len}"
            )));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DecideError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(rand::seq::index::sample(&mut *rng, hand_len, PASS_COUNT).into_vec())
    }

    fn pick_play(&self, view: &PlayerView) -> Result<usize, DecideError> {
        let mut options = legal_plays(&view.hand, view.trick_context());
        if options.is_empty() {
            options = (0..view.hand.len()).collect();
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DecideError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| DecideError::Internal("No cards left to play".into()))
    }
}

#[async_trait]
impl Decider for CpuPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError> {
        let answer = match question {
            Question::PassCards => Answer::PassCards(self.pick_pass(view.hand.len())?),
            Question::PlayOnTrick => Answer::PlayOnTrick(self.pick_play(view)?),
        };
        debug!(cpu = %self.name, ?answer, "[CPU] decided");
        Ok(answer)
    }

    fn notify(&self, _view: &PlayerView) {}

    fn show_info(&self, text: &str) {
        debug!(cpu = %self.name, info = text, "[CPU] rejected");
    }
}
