use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card, CardSet, Rank, Suit};
use holdem_engine::deck::{CardSource, Deck, StackedDeck};
use holdem_engine::errors::{CardError, DeckError};

fn card(code: &str) -> Card {
    code.parse().expect("card code")
}

#[test]
fn parses_and_prints_card_codes() {
    let c = card("Ts");
    assert_eq!(c.rank, Rank::Ten);
    assert_eq!(c.suit, Suit::Spades);
    assert_eq!(c.to_string(), "Ts");
    assert_eq!(card("Kd").name(), "King of diamonds");
}

#[test]
fn rejects_bad_card_codes() {
    assert_eq!("Xs".parse::<Card>(), Err(CardError::RankSymbol('X')));
    assert_eq!("Kx".parse::<Card>(), Err(CardError::SuitSymbol('x')));
    assert!(matches!("K".parse::<Card>(), Err(CardError::CodeLength(_))));
    assert!(matches!("Kss".parse::<Card>(), Err(CardError::CodeLength(_))));
}

#[test]
fn cards_compare_by_rank_only() {
    assert_eq!(card("Kc"), card("Kd"));
    assert!(!card("Kc").same_card(&card("Kd")));
    assert!(card("Ac") > card("Kd"));
    assert!(card("2h") < card("3c"));
}

#[test]
fn full_deck_holds_52_distinct_cards() {
    let deck = full_deck();
    assert_eq!(deck.len(), 52);
    let codes: HashSet<String> = deck.iter().map(|c| c.to_string()).collect();
    assert_eq!(codes.len(), 52);
    assert!(deck.iter().all(|c| c.rank != Rank::LowAce));
}

#[test]
fn card_set_respects_capacity() {
    let mut hand = CardSet::hand();
    hand.push(card("As")).unwrap();
    hand.push(card("Ad")).unwrap();
    assert!(hand.is_full());
    assert_eq!(hand.push(card("Ah")), Err(CardError::Overflow { capacity: 2 }));
    assert_eq!(hand.to_string(), "As/Ad");

    assert!(CardSet::parse("2c/3c/4c", CardSet::HAND).is_err());
    assert!(CardSet::parse("", CardSet::TABLE).unwrap().is_empty());
}

#[test]
fn starting_hand_notation() {
    let notation = |text: &str| CardSet::parse(text, CardSet::HAND).unwrap().notation();
    assert_eq!(notation("Kd/8s").as_deref(), Some("K8o"));
    assert_eq!(notation("4c/Tc").as_deref(), Some("T4s"));
    assert_eq!(notation("3d/3h").as_deref(), Some("33"));
    assert!(CardSet::parse("3d/3h", 2).unwrap().is_pair());
    assert_eq!(CardSet::parse("3d", 2).unwrap().notation(), None);
}

#[test]
fn same_seed_same_shuffles() {
    let mut a = Deck::new_with_seed(42);
    let mut b = Deck::new_with_seed(42);
    for _ in 0..3 {
        a.refresh();
        b.refresh();
        let first: Vec<Card> = (0..52).map(|_| a.pull().unwrap()).collect();
        let second: Vec<Card> = (0..52).map(|_| b.pull().unwrap()).collect();
        assert_eq!(
            first.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            second.iter().map(|c| c.to_string()).collect::<Vec<_>>()
        );
    }
}

#[test]
fn refreshed_deck_deals_every_card_once() {
    let mut deck = Deck::new_with_seed(7);
    deck.refresh();
    let mut seen = HashSet::new();
    while let Ok(c) = deck.pull() {
        assert!(seen.insert(c.to_string()));
    }
    assert_eq!(seen.len(), 52);
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.pull(), Err(DeckError::Empty));
}

#[test]
fn pull_from_checks_supply_first() {
    let mut deck = StackedDeck::parse(&["As/Kd"]).unwrap();
    deck.refresh();
    let mut board = CardSet::table();
    assert_eq!(
        board.pull_from(&mut deck, 3),
        Err(DeckError::Short { needed: 3, remaining: 2 })
    );
    assert!(board.is_empty());
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn stacked_deck_replays_rounds_in_order() {
    let mut deck = StackedDeck::parse(&["As/Kd", "2c"]).unwrap();
    assert_eq!(deck.rounds_left(), 2);
    assert_eq!(deck.remaining(), 0);

    deck.refresh();
    assert_eq!(deck.pull().unwrap().to_string(), "As");
    assert_eq!(deck.pull().unwrap().to_string(), "Kd");
    assert!(deck.pull().is_err());

    deck.refresh();
    assert_eq!(deck.pull().unwrap().to_string(), "2c");

    deck.refresh();
    assert_eq!(deck.remaining(), 0);
}
