//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod passing;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_passing;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use deck::{deal_hands, Deck};
pub use passing::PassDirection;
pub use snapshot::{PlayerView, SeatInfo};
pub use state::{GameState, RoundRecord, SeatIndex, TrickRecord};
