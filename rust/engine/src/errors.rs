use thiserror::Error;

use crate::cards::Card;
use crate::player::ActionKind;

/// Problems with construction-time settings. Fix the configuration and build a new game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Starting chips must be positive")]
    ZeroChips,
    #[error("Blinds must be positive, got small {small} and big {big}")]
    NonPositiveBlind { small: u32, big: u32 },
    #[error("Small blind {small} must be lower than big blind {big}")]
    BlindOrder { small: u32, big: u32 },
    #[error("Expected 2 to 10 players, got {0}")]
    PlayerCount(usize),
    #[error("Player identifiers must be unique")]
    DuplicatePlayer,
    #[error("Seat order must be a permutation of 0..{players}")]
    InvalidOrder { players: usize },
    #[error("Chips on the table add up to {total}, the limit is 4294967295")]
    ChipTotal { total: u64 },
    #[error("Malformed settings: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Empty card symbol")]
    EmptySymbol,
    #[error("Unknown rank symbol '{0}'")]
    RankSymbol(char),
    #[error("Unknown suit symbol '{0}'")]
    SuitSymbol(char),
    #[error("Card code must be two characters, got \"{0}\"")]
    CodeLength(String),
    #[error("Card set is full (capacity {capacity})")]
    Overflow { capacity: usize },
}

/// Evaluator contract violations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Expected 2 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("Card {0} appears twice")]
    DuplicateCard(Card),
    #[error("Low ace is only produced by straight detection")]
    SyntheticCard,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck is empty")]
    Empty,
    #[error("Deck holds {remaining} cards, {needed} needed")]
    Short { needed: usize, remaining: usize },
}

/// Recoverable runtime failures. The engine reports them inside a failure
/// [`crate::context::Context`] and leaves its state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown action kind \"{0}\"")]
    UnknownKind(String),
    #[error("Action kind \"{0}\" can not be submitted")]
    UnsupportedKind(ActionKind),
    #[error("Bet for \"{0}\" must be positive")]
    ZeroBet(ActionKind),
    #[error("Raise of {bet} is outside the allowed range {min}..={max}")]
    RaiseRange { bet: u32, min: u32, max: u32 },
    #[error("Call is not available")]
    CallUnavailable,
    #[error("Check is not available, {dif} to call")]
    CheckUnavailable { dif: u32 },
    #[error("No player action is expected now")]
    NoActionExpected,
    #[error("No new stage is expected now")]
    NoStageExpected,
    #[error("Current round is not finished")]
    RoundInProgress,
    #[error("Game is over")]
    GameOver,
    #[error("At least two players must be seated in the round")]
    NotEnoughPlayers,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}
