use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::cards::{full_deck, Card, CardSet};
use crate::errors::EvalError;
use crate::hand::evaluate;

/// Showdown tally of one hand against another.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Equity {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    pub trials: u32,
}

impl Equity {
    /// Share of the pot won on average, ties counted as half.
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + f64::from(self.ties) / 2.0) / f64::from(self.trials)
    }
}

/// Monte Carlo estimate of `hero` against `villain`.
///
/// The board is completed from the unseen cards `trials` times. A complete
/// board needs only one evaluation, so `trials` is ignored for it.
///
/// ```
/// use holdem_engine::cards::CardSet;
/// use holdem_engine::equity;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let hero = CardSet::parse("As/Ad", CardSet::HAND).unwrap();
/// let villain = CardSet::parse("7c/2h", CardSet::HAND).unwrap();
/// let board = CardSet::table();
/// let mut rng = ChaCha20Rng::seed_from_u64(3);
///
/// let equity = equity::estimate(&hero, &villain, &board, 500, &mut rng).unwrap();
/// assert!(equity.win_rate() > 0.7);
/// ```
pub fn estimate<R: Rng + ?Sized>(
    hero: &CardSet,
    villain: &CardSet,
    board: &CardSet,
    trials: u32,
    rng: &mut R,
) -> Result<Equity, EvalError> {
    if hero.len() != CardSet::HAND {
        return Err(EvalError::CardCount(hero.len()));
    }
    if villain.len() != CardSet::HAND {
        return Err(EvalError::CardCount(villain.len()));
    }
    if board.len() > CardSet::TABLE {
        return Err(EvalError::CardCount(board.len()));
    }

    let mut known: Vec<Card> = Vec::with_capacity(9);
    for card in hero.iter().chain(villain).chain(board) {
        if known.iter().any(|k| k.same_card(card)) {
            return Err(EvalError::DuplicateCard(*card));
        }
        known.push(*card);
    }
    let mut unseen: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !known.iter().any(|k| k.same_card(c)))
        .collect();

    let missing = CardSet::TABLE - board.len();
    let trials = if missing == 0 { 1 } else { trials };
    let mut equity = Equity::default();
    let mut cards = Vec::with_capacity(CardSet::EVALUATION);
    for _ in 0..trials {
        let (drawn, _) = unseen.partial_shuffle(rng, missing);

        cards.clear();
        cards.extend(board.iter().copied());
        cards.extend_from_slice(drawn);

        cards.extend(hero.iter().copied());
        let ours = evaluate(&cards)?;
        cards.truncate(CardSet::TABLE);
        cards.extend(villain.iter().copied());
        let theirs = evaluate(&cards)?;

        match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => equity.wins += 1,
            std::cmp::Ordering::Equal => equity.ties += 1,
            std::cmp::Ordering::Less => equity.losses += 1,
        }
        equity.trials += 1;
    }
    Ok(equity)
}
