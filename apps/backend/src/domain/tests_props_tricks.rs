use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::deck::{deal_hands, Deck};
use crate::domain::test_gens;
use crate::domain::tricks::{legal_plays, trick_winner_offset, TrickContext};
use crate::domain::Card;

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// A shuffled deck is always a permutation of the 52 cards.
    #[test]
    fn prop_shuffled_deck_is_complete(seed in any::<u64>()) {
        let deck = Deck::shuffled_with(&mut StdRng::seed_from_u64(seed));
        let distinct: HashSet<Card> = deck.iter().copied().collect();
        prop_assert_eq!(deck.len(), 52);
        prop_assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn prop_sort_is_idempotent(cards in test_gens::unique_cards(20)) {
        let mut once = Deck::from(cards);
        once.sort();
        let mut twice = once.clone();
        twice.sort();
        prop_assert_eq!(once, twice);
    }

    /// Dealing leaves four disjoint 13-card hands.
    #[test]
    fn prop_deal_gives_thirteen_each(cards in test_gens::shuffled_cards()) {
        let hands = deal_hands(Deck::from(cards)).unwrap();
        let mut seen = HashSet::new();
        for hand in &hands {
            prop_assert_eq!(hand.len(), 13);
            for card in hand {
                prop_assert!(seen.insert(*card));
            }
        }
    }

    /// The winner is the highest card of the led suit; off-suit cards never win.
    #[test]
    fn prop_trick_winner_is_highest_led_suit(cards in test_gens::unique_cards(4)) {
        let trick = Deck::from(cards.clone());
        let offset = trick_winner_offset(&trick).unwrap();
        let lead = cards[0].suit;
        prop_assert_eq!(cards[offset].suit, lead);
        for card in cards.iter().filter(|c| c.suit == lead) {
            prop_assert!(cards[offset].rank >= card.rank);
        }
    }

    /// A seat holding the led suit may only play that suit.
    #[test]
    fn prop_follow_suit_when_able(
        hand in test_gens::hand(),
        lead in test_gens::suit(),
        first_trick in any::<bool>(),
        hearts_broken in any::<bool>(),
    ) {
        let ctx = TrickContext { lead: Some(lead), first_trick, hearts_broken };
        let legal = legal_plays(&hand, ctx);
        prop_assert!(!legal.is_empty());
        if hand.has_suit(lead) {
            for i in legal {
                prop_assert_eq!(hand.get(i).unwrap().suit, lead);
            }
        }
    }

    /// Whoever holds the Two of Clubs can open with nothing else.
    #[test]
    fn prop_opening_lead_is_two_of_clubs(hands in test_gens::dealt_hands()) {
        let ctx = TrickContext { lead: None, first_trick: true, hearts_broken: false };
        let holder = hands
            .iter()
            .position(|h| h.first() == Some(Card::TWO_OF_CLUBS))
            .unwrap();
        prop_assert_eq!(legal_plays(&hands[holder], ctx), vec![0]);
        for (seat, hand) in hands.iter().enumerate() {
            if seat != holder {
                prop_assert!(legal_plays(hand, ctx).is_empty());
            }
        }
    }

    /// Any dealt hand has at least one legal lead once the opening trick is over.
    #[test]
    fn prop_some_lead_always_legal(hand in test_gens::hand(), hearts_broken in any::<bool>()) {
        let ctx = TrickContext { lead: None, first_trick: false, hearts_broken };
        prop_assert!(!legal_plays(&hand, ctx).is_empty());
    }
}
