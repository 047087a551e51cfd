use crate::domain::deck::Deck;
use crate::domain::rules::{point_value, PLAYERS, TRICKS_PER_ROUND};
use crate::domain::state::{GameState, SeatIndex, TrickRecord};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// What the legality check needs to know about the trick in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickContext {
    pub lead: Option<Suit>,
    pub first_trick: bool,
    pub hearts_broken: bool,
}

impl TrickContext {
    pub fn of(state: &GameState) -> Self {
        Self {
            lead: state.lead_suit(),
            first_trick: state.is_first_trick(),
            hearts_broken: state.hearts_broken,
        }
    }
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    pub card: Card,
    /// True when this play is the one that broke hearts.
    pub broke_hearts: bool,
    /// Set once the fourth card lands.
    pub completed: Option<TrickRecord>,
}

/// Whether the hand has anything other than Hearts and the Queen of Spades.
fn has_painless(hand: &Deck) -> bool {
    hand.has_suit(Suit::Clubs) || hand.has_suit(Suit::Diamonds) || hand.contains_non_queen_spade()
}

/// Check the card at `index` against the lead and follow rules.
///
/// Returns the card on success; the error detail is the reason shown to the
/// player before they are asked again.
pub fn check_play(hand: &Deck, index: usize, ctx: TrickContext) -> Result<Card, DomainError> {
    let card = hand.get(index).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::MalformedAnswer,
            "Could not understand answer",
        )
    })?;

    match ctx.lead {
        None => {
            if ctx.first_trick && card != Card::TWO_OF_CLUBS {
                return Err(DomainError::validation(
                    ValidationKind::MustLeadTwoOfClubs,
                    "Must lead with the 2 of clubs",
                ));
            }
            let only_hearts = hand.iter().all(|c| c.suit == Suit::Hearts);
            if card.suit == Suit::Hearts && !ctx.hearts_broken && !only_hearts {
                return Err(DomainError::validation(
                    ValidationKind::HeartsNotBroken,
                    "Hearts not broken, lead with another suit",
                ));
            }
        }
        Some(lead) => {
            if card.suit != lead && hand.has_suit(lead) {
                return Err(DomainError::validation(
                    ValidationKind::MustFollowSuit,
                    format!("Must play the lead suit: {}", lead.as_str()),
                ));
            }
            if ctx.first_trick && card.suit != lead && card.is_point_card() && has_painless(hand) {
                return Err(DomainError::validation(
                    ValidationKind::NoPointsOnFirstTrick,
                    "Cannot play heart or QoS on the first trick unless you have no alternative",
                ));
            }
        }
    }

    Ok(card)
}

/// Indices into `hand` that `check_play` accepts.
pub fn legal_plays(hand: &Deck, ctx: TrickContext) -> Vec<usize> {
    (0..hand.len())
        .filter(|&i| check_play(hand, i, ctx).is_ok())
        .collect()
}

/// Offset from the leader of the highest card of the led suit.
pub fn trick_winner_offset(trick: &Deck) -> Option<usize> {
    let lead = trick.first()?.suit;
    trick
        .iter()
        .enumerate()
        .filter(|(_, c)| c.suit == lead)
        .max_by_key(|(_, c)| c.rank)
        .map(|(i, _)| i)
}

/// Seat whose turn it is in the trick in progress.
pub fn seat_to_play(state: &GameState) -> Option<SeatIndex> {
    let leader = state.leader?;
    if state.current_trick.len() >= PLAYERS {
        return None;
    }
    Some((leader + state.current_trick.len()) % PLAYERS)
}

/// Validate then apply one play for `seat`; nothing changes on error.
pub fn play_card(
    state: &mut GameState,
    seat: SeatIndex,
    index: usize,
) -> Result<PlayCardResult, DomainError> {
    if seat_to_play(state) != Some(seat) {
        return Err(DomainError::validation_other("Out of turn"));
    }
    let ctx = TrickContext::of(state);
    check_play(&state.seat(seat).hand, index, ctx)?;

    let card = state
        .seat_mut(seat)
        .hand
        .take(index)
        .ok_or_else(|| DomainError::validation_other("Card vanished from hand"))?;
    state.current_trick.push(card);

    // Only an off-suit Heart or Queen of Spades breaks hearts.
    let breaks = card.is_point_card() && ctx.lead.is_some_and(|lead| lead != card.suit);
    let broke_hearts = breaks && !state.hearts_broken;
    if breaks {
        state.hearts_broken = true;
    }

    let completed = if state.current_trick.len() == PLAYERS {
        Some(complete_trick(state)?)
    } else {
        None
    };

    Ok(PlayCardResult {
        card,
        broke_hearts,
        completed,
    })
}

/// Award the full trick to its winner and hand them the lead.
fn complete_trick(state: &mut GameState) -> Result<TrickRecord, DomainError> {
    let leader = state
        .leader
        .ok_or_else(|| DomainError::validation_other("Trick has no leader"))?;
    let offset = trick_winner_offset(&state.current_trick)
        .ok_or_else(|| DomainError::validation_other("Trick is empty"))?;
    let winner = (leader + offset) % PLAYERS;
    let points = point_value(state.current_trick.iter());

    let plays = state
        .current_trick
        .iter()
        .enumerate()
        .map(|(i, c)| ((leader + i) % PLAYERS, *c))
        .collect();
    let record = TrickRecord {
        leader,
        plays,
        winner,
        points,
    };

    state.seat_mut(winner).round_points += points;
    state.current_trick.clear();
    state.trick_no += 1;
    state.leader = if state.trick_no < TRICKS_PER_ROUND {
        Some(winner)
    } else {
        None
    };
    state.round_tricks.push(record.clone());
    Ok(record)
}
