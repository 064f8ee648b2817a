use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::deck::CardSource;
use crate::errors::{CardError, DeckError};

/// Represents one of the four suits in a standard 52-card deck.
/// Suits never take part in ranking, they only matter for flushes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Suit, CardError> {
        match symbol {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            other => Err(CardError::SuitSymbol(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(CardError::EmptySymbol),
            (Some(c), None) => Suit::from_symbol(c),
            _ => Err(CardError::CodeLength(s.to_string())),
        }
    }
}

/// Represents the rank (face value) of a playing card.
///
/// `LowAce` never comes out of a deck. The evaluator materializes it next to a
/// real ace so the wheel (A-2-3-4-5) reads as an ordinary run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace played low in a wheel (1)
    LowAce = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    /// Maps 1..=14 onto ranks. Anything else is `None`.
    pub fn from_u8(v: u8) -> Option<Rank> {
        let rank = match v {
            1 => Rank::LowAce,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::LowAce => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Rank, CardError> {
        let rank = match symbol {
            '1' => Rank::LowAce,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            other => return Err(CardError::RankSymbol(other)),
        };
        Ok(rank)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::LowAce | Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl FromStr for Rank {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(CardError::EmptySymbol),
            (Some(c), None) => Rank::from_symbol(c),
            _ => Err(CardError::CodeLength(s.to_string())),
        }
    }
}

/// A single playing card.
///
/// Equality, ordering and hashing look at the rank only: `Ks == Kc`. Use
/// [`Card::same_card`] when the suit matters too.
///
/// ```
/// use holdem_engine::cards::Card;
///
/// let king: Card = "Ks".parse().unwrap();
/// let other_king = "Kc".parse::<Card>().unwrap();
/// assert_eq!(king, other_king);
/// assert!(!king.same_card(&other_king));
/// assert_eq!(king.name(), "King of spades");
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn same_card(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }

    pub fn name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (None, _, _) => Err(CardError::EmptySymbol),
            (Some(r), Some(su), None) => Ok(Card::new(Rank::from_symbol(r)?, Suit::from_symbol(su)?)),
            _ => Err(CardError::CodeLength(s.to_string())),
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

/// Deck ranks, Two through Ace. `LowAce` is not part of a deck.
pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

/// Ordered, bounded collection of cards: hole cards, the table or an
/// evaluation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    cards: Vec<Card>,
    capacity: usize,
}

impl CardSet {
    pub const HAND: usize = 2;
    pub const TABLE: usize = 5;
    pub const EVALUATION: usize = 7;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn hand() -> Self {
        Self::with_capacity(Self::HAND)
    }

    pub fn table() -> Self {
        Self::with_capacity(Self::TABLE)
    }

    /// Parses '/'-delimited codes such as `"As/Ks/Qs"`. An empty string is an empty set.
    pub fn parse(text: &str, capacity: usize) -> Result<Self, CardError> {
        let mut set = Self::with_capacity(capacity);
        if text.is_empty() {
            return Ok(set);
        }
        for code in text.split('/') {
            set.push(code.parse()?)?;
        }
        Ok(set)
    }

    pub fn push(&mut self, card: Card) -> Result<(), CardError> {
        if self.is_full() {
            return Err(CardError::Overflow {
                capacity: self.capacity,
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Pulls `count` cards from `source`. Checks room and supply before the first pull.
    pub fn pull_from<S: CardSource + ?Sized>(&mut self, source: &mut S, count: usize) -> Result<(), DeckError> {
        let room = self.capacity - self.cards.len();
        if count > room || count > source.remaining() {
            return Err(DeckError::Short {
                needed: count,
                remaining: source.remaining().min(room),
            });
        }
        for _ in 0..count {
            let card = source.pull()?;
            self.cards.push(card);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a == b)
    }

    /// Starting-hand shorthand for two cards: `"33"`, `"T4s"`, `"K8o"`.
    pub fn notation(&self) -> Option<String> {
        let [a, b] = self.cards.as_slice() else {
            return None;
        };
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        if high == low {
            return Some(format!("{}{}", high.rank.symbol(), low.rank.symbol()));
        }
        let kind = if high.suit == low.suit { 's' } else { 'o' };
        Some(format!("{}{}{}", high.rank.symbol(), low.rank.symbol(), kind))
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CardSet {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
