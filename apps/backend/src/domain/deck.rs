//! Deck: an ordered run of cards with the few queries the rules need.
//!
//! The same type backs the full 52-card deck, each seat's hand and the
//! current trick.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// All 52 cards in suit-then-rank order.
    pub fn full() -> Self {
        let mut cards = Vec::with_capacity(PLAYERS * HAND_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card { suit, rank });
            }
        }
        Self(cards)
    }

    /// Full deck in a uniformly random order, drawn from the thread RNG.
    pub fn new_shuffled() -> Self {
        Self::shuffled_with(&mut rand::rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::full();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    /// Remove and return the front card.
    pub fn deal(&mut self) -> Result<Card, DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyDeck,
                "Cannot deal from an empty deck",
            ));
        }
        Ok(self.0.remove(0))
    }

    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn append(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }

    /// Remove the card at `index`, shifting later cards down.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Remove several cards at once. Indices must be distinct and in range.
    pub fn take_many(&mut self, indices: &[usize]) -> Option<Vec<Card>> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != indices.len() || sorted.last().is_some_and(|&i| i >= self.0.len()) {
            return None;
        }
        let taken = sorted.iter().map(|&i| self.0[i]).collect();
        for &i in sorted.iter().rev() {
            self.0.remove(i);
        }
        Some(taken)
    }

    /// Suit order, then rank order. Stable and idempotent.
    pub fn sort(&mut self) {
        self.0.sort();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, rank: Rank, suit: Suit) -> bool {
        self.0.iter().any(|c| c.rank == rank && c.suit == suit)
    }

    pub fn contains_non_queen_spade(&self) -> bool {
        self.0
            .iter()
            .any(|c| c.suit == Suit::Spades && c.rank != Rank::Queen)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.0.iter().any(|c| c.suit == suit)
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> Option<Card> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    /// `{0:[clubs 2], 1:[clubs 9], ...}` for line-oriented display.
    pub fn numbered(&self) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{i}:{c}"))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Deal a deck round-robin starting at seat 0 until it is empty, then sort
/// every hand.
pub fn deal_hands(mut deck: Deck) -> Result<[Deck; PLAYERS], DomainError> {
    let mut hands: [Deck; PLAYERS] = Default::default();
    let mut seat = 0;
    while !deck.is_empty() {
        let card = deck.deal()?;
        hands[seat].push(card);
        seat = (seat + 1) % PLAYERS;
    }
    for hand in hands.iter_mut() {
        hand.sort();
    }
    Ok(hands)
}
