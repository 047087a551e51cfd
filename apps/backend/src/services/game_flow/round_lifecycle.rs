//! One round: deal, pass, thirteen tricks, score.

use tokio::task::JoinSet;
use tracing::{debug, info};

use super::player_actions::{ask, ask_pass, MALFORMED};
use super::{HeartsGame, RoundAbort};
use crate::domain::passing::apply_pass;
use crate::domain::rules::{PLAYERS, TRICKS_PER_ROUND};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::tricks::{play_card, seat_to_play};
use crate::domain::{deal_hands, Deck, PassDirection};
use crate::errors::domain::DomainError;
use crate::players::{Answer, Question};

impl HeartsGame {
    pub(super) async fn play_round(&mut self) -> Result<(), RoundAbort> {
        let hands = deal_hands(Deck::shuffled_with(&mut self.rng))?;
        self.state.begin_round(hands);
        info!(
            round_no = self.state.round_no,
            pass = self.state.pass_direction.as_str(),
            "[GAME] round dealt"
        );
        self.notify_all();

        self.pass_phase().await?;

        self.state.leader = Some(self.state.opening_leader());
        for _ in 0..TRICKS_PER_ROUND {
            self.play_trick().await?;
        }

        let record = apply_round_scoring(&mut self.state);
        info!(
            round_no = record.round_no,
            round_points = ?record.round_points,
            shot_the_moon = ?record.shot_the_moon,
            scores = ?self.state.seats.iter().map(|s| s.score).collect::<Vec<_>>(),
            "[GAME] round scored"
        );
        self.notify_all();
        Ok(())
    }

    /// Ask all four seats at once; only a seat with a bad answer is asked again.
    async fn pass_phase(&mut self) -> Result<(), RoundAbort> {
        if self.state.pass_direction == PassDirection::None {
            apply_pass(&mut self.state, &Default::default())?;
            self.notify_all();
            return Ok(());
        }

        let mut asks = JoinSet::new();
        for seat in 0..PLAYERS {
            let decider = self.deciders[seat].clone();
            let view = self.state.view_for(seat);
            let cancel = self.cancel.clone();
            asks.spawn(async move { (seat, ask_pass(decider, view, cancel).await) });
        }

        let mut picks: [Vec<usize>; PLAYERS] = Default::default();
        while let Some(joined) = asks.join_next().await {
            match joined {
                Ok((seat, Ok(indices))) => picks[seat] = indices,
                Ok((_, Err(abort))) => {
                    asks.abort_all();
                    return Err(abort);
                }
                Err(join_err) => {
                    asks.abort_all();
                    return Err(RoundAbort::Failed(DomainError::validation_other(format!(
                        "pass task failed: {join_err}"
                    ))));
                }
            }
        }

        apply_pass(&mut self.state, &picks)?;
        debug!(round_no = self.state.round_no, "[GAME] cards passed");
        self.notify_all();
        Ok(())
    }

    /// Four plays in seating order from the leader, one seat at a time.
    async fn play_trick(&mut self) -> Result<(), RoundAbort> {
        for _ in 0..PLAYERS {
            let seat = seat_to_play(&self.state)
                .ok_or_else(|| DomainError::validation_other("No seat to play"))?;
            let decider = self.deciders[seat].clone();
            loop {
                let view = self.state.view_for(seat);
                let index = match ask(decider.as_ref(), Question::PlayOnTrick, &view, &self.cancel).await? {
                    Answer::PlayOnTrick(index) => index,
                    Answer::PassCards(_) => {
                        decider.show_info(MALFORMED);
                        continue;
                    }
                };
                match play_card(&mut self.state, seat, index) {
                    Ok(result) => {
                        if let Some(trick) = result.completed {
                            debug!(
                                trick_no = self.state.trick_no,
                                winner = trick.winner,
                                points = trick.points,
                                "[GAME] trick complete"
                            );
                        }
                        self.notify_all();
                        break;
                    }
                    Err(err) => decider.show_info(err.detail()),
                }
            }
        }
        Ok(())
    }
}
