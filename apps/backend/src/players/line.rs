//! Line-oriented human seat for terminals and other text streams.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::trait_def::{Answer, DecideError, Decider, Question};
use crate::domain::rules::PASS_COUNT;
use crate::domain::PlayerView;

type Reader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Renders snapshots as text and reads answers one line at a time.
///
/// Output goes through a single writer task so notifications and prompts
/// keep their order.
pub struct LinePlayer {
    name: String,
    input: Mutex<Reader>,
    output: mpsc::UnboundedSender<String>,
    on_eof: Option<CancellationToken>,
}

impl LinePlayer {
    /// Must be called inside a tokio runtime; spawns the writer task.
    pub fn spawn<R, W>(name: impl Into<String>, input: R, mut output: W) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                if output.write_all(text.as_bytes()).await.is_err() {
                    break;
                }
                if output.flush().await.is_err() {
                    break;
                }
            }
        });
        Self {
            name: name.into(),
            input: Mutex::new(Box::new(input)),
            output: tx,
            on_eof: None,
        }
    }

    /// Cancel `token` when the input stream ends.
    pub fn cancel_on_eof(mut self, token: CancellationToken) -> Self {
        self.on_eof = Some(token);
        self
    }

    fn write(&self, text: String) {
        if self.output.send(text).is_err() {
            debug!(seat = %self.name, "[LINE] output closed");
        }
    }

    async fn read_line(&self) -> Result<String, DecideError> {
        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| DecideError::Internal(format!("read failed: {e}")))?;
        if read == 0 {
            if let Some(token) = &self.on_eof {
                token.cancel();
            }
            return Err(DecideError::Disconnected);
        }
        Ok(line)
    }
}

/// Score line, trick in progress, and the numbered hand.
pub fn render(view: &PlayerView) -> String {
    let mut out = String::from("-------------\nScores: ");
    for name in &view.seat_order {
        let score = view.per_seat.get(name).map_or(0, |s| s.score);
        out.push_str(&format!("( {name}: {score} ) "));
    }
    out.push('\n');
    out.push_str(&format!("Current Trick: {}\n", view.current_trick));
    out.push_str(&format!("Hand: {}\n", view.hand.numbered()));
    if view.game_over {
        out.push_str("-----------\nGame Over!\n");
        if let Some(loser) = &view.loser {
            out.push_str(&format!("Loser: {loser}\n"));
        }
    }
    out
}

/// `"i j k"` for a pass, `"i"` for a play.
pub fn parse_answer(question: Question, line: &str) -> Option<Answer> {
    let numbers: Result<Vec<usize>, _> = line.split_whitespace().map(str::parse).collect();
    let numbers = numbers.ok()?;
    match question {
        Question::PassCards if numbers.len() == PASS_COUNT => Some(Answer::PassCards(numbers)),
        Question::PlayOnTrick if numbers.len() == 1 => Some(Answer::PlayOnTrick(numbers[0])),
        _ => None,
    }
}

#[async_trait]
impl Decider for LinePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn decide(&self, question: Question, view: &PlayerView) -> Result<Answer, DecideError> {
        let prompt = match question {
            Question::PassCards => format!(
                "Passing {}. Pass 3 cards by index, separated by spaces: ",
                view.pass_direction.as_str()
            ),
            Question::PlayOnTrick => "Play a card by index:\n".to_string(),
        };
        self.write(render(view) + &prompt);

        let line = self.read_line().await?;
        parse_answer(question, &line)
            .ok_or_else(|| DecideError::Internal(format!("unparseable answer {:?}", line.trim())))
    }

    fn notify(&self, view: &PlayerView) {
        self.write(render(view));
    }

    fn show_info(&self, text: &str) {
        self.write(format!("{text}\n"));
    }
}
