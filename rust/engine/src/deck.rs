use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, CardSet};
use crate::errors::{CardError, DeckError};

/// Anything the game can deal from.
pub trait CardSource {
    /// Prepares a fresh supply for a new round.
    fn refresh(&mut self);
    fn pull(&mut self) -> Result<Card, DeckError>;
    fn remaining(&self) -> usize;
}

/// A 52-card pack shuffled by an injected RNG on every refresh.
#[derive(Debug)]
pub struct Deck<R = ChaCha20Rng> {
    cards: Vec<Card>,
    position: usize,
    rng: R,
}

impl Deck<ChaCha20Rng> {
    /// Same seed, same sequence of shuffles.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Deck<R> {
    /// Keeps the unshuffled order until the first [`CardSource::refresh`].
    pub fn new(rng: R) -> Self {
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }
}

impl<R: Rng> CardSource for Deck<R> {
    fn refresh(&mut self) {
        self.shuffle();
    }

    fn pull(&mut self) -> Result<Card, DeckError> {
        self.deal_card().ok_or(DeckError::Empty)
    }

    fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

/// Replays predetermined rounds. Each refresh loads the next round and
/// cards come out front to back; once the rounds run out the deck is empty.
#[derive(Debug, Clone, Default)]
pub struct StackedDeck {
    rounds: VecDeque<Vec<Card>>,
    current: VecDeque<Card>,
}

impl StackedDeck {
    pub fn new<I>(rounds: I) -> Self
    where
        I: IntoIterator<Item = Vec<Card>>,
    {
        Self {
            rounds: rounds.into_iter().collect(),
            current: VecDeque::new(),
        }
    }

    /// Builds rounds from '/'-delimited card strings, one string per round.
    pub fn parse(rounds: &[&str]) -> Result<Self, CardError> {
        let parsed = rounds
            .iter()
            .map(|text| CardSet::parse(text, 52).map(|set| set.cards().to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(parsed))
    }

    pub fn rounds_left(&self) -> usize {
        self.rounds.len()
    }
}

impl CardSource for StackedDeck {
    fn refresh(&mut self) {
        self.current = self.rounds.pop_front().unwrap_or_default().into();
    }

    fn pull(&mut self) -> Result<Card, DeckError> {
        self.current.pop_front().ok_or(DeckError::Empty)
    }

    fn remaining(&self) -> usize {
        self.current.len()
    }
}

impl<S: CardSource + ?Sized> CardSource for &mut S {
    fn refresh(&mut self) {
        (**self).refresh();
    }

    fn pull(&mut self) -> Result<Card, DeckError> {
        (**self).pull()
    }

    fn remaining(&self) -> usize {
        (**self).remaining()
    }
}
