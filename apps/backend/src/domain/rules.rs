use crate::domain::Card;

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 13;
pub const TRICKS_PER_ROUND: usize = 13;
pub const PASS_COUNT: usize = 3;

/// Every point card in one round: 13 hearts plus 13 for the Queen of Spades.
pub const MOON_POINTS: u32 = 26;
pub const DEFAULT_MAX_POINTS: u32 = 100;

/// Point value of a single card.
pub fn card_points(card: Card) -> u32 {
    if card == Card::QUEEN_OF_SPADES {
        13
    } else if card.suit == crate::domain::Suit::Hearts {
        1
    } else {
        0
    }
}

/// Point value of a set of cards (typically a completed trick).
pub fn point_value<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|c| card_points(*c)).sum()
}
