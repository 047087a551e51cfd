//! Terminal game: one line-based human against three CPU seats.

use std::sync::Arc;

use hearts::domain::rules::DEFAULT_MAX_POINTS;
use hearts::players::{CpuPlayer, Decider, LinePlayer};
use hearts::HeartsGame;
use rand::seq::SliceRandom;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "You".to_string());
    let input_closed = CancellationToken::new();

    let mut seats: Vec<Arc<dyn Decider>> = vec![
        Arc::new(
            LinePlayer::spawn(
                name,
                tokio::io::BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .cancel_on_eof(input_closed.clone()),
        ),
        Arc::new(CpuPlayer::new("Alice", None)),
        Arc::new(CpuPlayer::new("Bob", None)),
        Arc::new(CpuPlayer::new("Charlie", None)),
    ];
    seats.shuffle(&mut rand::rng());

    let game = match HeartsGame::new(seats, DEFAULT_MAX_POINTS) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let running = game.start();
    let cancel = running.cancel_token();
    tokio::spawn(async move {
        tokio::select! {
            _ = input_closed.cancelled() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        cancel.cancel();
    });

    let outcome = match running.wait().await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    if outcome.cancelled() {
        println!("Game ended early.");
        return;
    }
    for seat in &outcome.state.seats {
        println!("{:>10}: {}", seat.name, seat.score);
    }
    if let Some(loser) = outcome.loser() {
        println!("{loser} reached {DEFAULT_MAX_POINTS} points.");
    }
}
