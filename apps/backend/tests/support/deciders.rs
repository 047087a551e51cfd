//! Deciders that record what the driver asked of them.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use hearts::domain::PlayerView;
use hearts::players::{Answer, DecideError, Decider, Question};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
pub struct Recorder {
    pub questions: Mutex<Vec<(u32, Question)>>,
    pub infos: Mutex<Vec<String>>,
    pub last_view: Mutex<Option<PlayerView>>,
}

impl Recorder {
    pub fn questions_in_round(&self, round_no: u32, question: Question) -> usize {
        self.questions
            .lock()
            .iter()
            .filter(|(r, q)| *r == round_no && *q == question)
            .count()
    }
}

/// Replays scripted answers first, then defers to `inner`.
pub struct RecordingDecider {
    inner: Arc<dyn Decider>,
    script: Mutex<VecDeque<Answer>>,
    pub record: Arc<Recorder>,
}

impl RecordingDecider {
    pub fn new(inner: Arc<dyn Decider>) -> Self {
        Self {
            inner,
            script: Mutex::new(VecDeque::new()),
            record: Arc::new(Recorder::default()),
        }
    }

    pub fn scripted(self, answers: Vec<Answer>) -> Self {
        *self.script.lock() = answers.into();
        self
    }
}

#[async_trait]
impl Decider for RecordingDecider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError> {
        self.record.questions.lock().push((view.round_no, question));
        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(answer) => Ok(answer),
            None => self.inner.decide(question, view).await,
        }
    }

    fn notify(&self, view: &PlayerView) {
        *self.record.last_view.lock() = Some(view.clone());
        self.inner.notify(view);
    }

    fn show_info(&self, text: &str) {
        self.record.infos.lock().push(text.to_string());
        self.inner.show_info(text);
    }
}

/// Never answers `stall_on`; anything else gets the lowest hand indices.
pub struct StallingDecider {
    name: String,
    stall_on: Question,
    pub stalled: Arc<Notify>,
    pub record: Arc<Recorder>,
}

impl StallingDecider {
    /// Passes its first three cards, then hangs on the first play.
    pub fn new(name: &str) -> Self {
        Self::stalling_on(name, Question::PlayOnTrick)
    }

    /// Hangs on the pass prompt.
    pub fn at_pass(name: &str) -> Self {
        Self::stalling_on(name, Question::PassCards)
    }

    fn stalling_on(name: &str, stall_on: Question) -> Self {
        Self {
            name: name.to_string(),
            stall_on,
            stalled: Arc::new(Notify::new()),
            record: Arc::new(Recorder::default()),
        }
    }
}

#[async_trait]
impl Decider for StallingDecider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError> {
        self.record.questions.lock().push((view.round_no, question));
        if question == self.stall_on {
            self.stalled.notify_one();
            return std::future::pending::<Result<Answer, DecideError>>().await;
        }
        match question {
            Question::PassCards => Ok(Answer::PassCards(vec![0, 1, 2])),
            Question::PlayOnTrick => Ok(Answer::PlayOnTrick(0)),
        }
    }

    fn notify(&self, view: &PlayerView) {
        *self.record.last_view.lock() = Some(view.clone());
    }

    fn show_info(&self, text: &str) {
        self.record.infos.lock().push(text.to_string());
    }
}
