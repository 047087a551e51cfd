//! Seat decision-makers.

pub mod cpu;
pub mod human;
pub mod line;
pub mod trait_def;

pub use cpu::CpuPlayer;
pub use human::{HumanPlayer, PendingPrompt, SeatSlot};
pub use line::LinePlayer;
pub use trait_def::{Answer, DecideError, Decider, Question};
