use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::CardSet;
use crate::deck::CardSource;
use crate::errors::{ActionError, DeckError, EvalError};
use crate::hand::{evaluate_with_hole, Combination};
use crate::rules::{self, Abilities, ValidatedAction};

/// Opaque player identity, usually a name or a number.
pub trait PlayerId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> PlayerId for T {}

/// Kinds of player actions with their textual constants.
/// `AllIn` is never submitted; it is recorded when a bet takes the whole stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "all-in")]
    AllIn,
    #[serde(rename = "blind_bet")]
    BlindBet,
    #[serde(rename = "call")]
    Call,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "fold")]
    Fold,
    #[serde(rename = "raise")]
    Raise,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::AllIn,
        ActionKind::BlindBet,
        ActionKind::Call,
        ActionKind::Check,
        ActionKind::Fold,
        ActionKind::Raise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::AllIn => "all-in",
            ActionKind::BlindBet => "blind_bet",
            ActionKind::Call => "call",
            ActionKind::Check => "check",
            ActionKind::Fold => "fold",
            ActionKind::Raise => "raise",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ActionError::UnknownKind(s.to_string()))
    }
}

/// An action as recorded after it was accepted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub bet: u32,
}

/// One seat's account: stack, bets at round and street scope, and the
/// derived legal-action menu.
///
/// Street-scoped fields reset in [`Player::new_stage`], round-scoped ones in
/// [`Player::new_round`].
#[derive(Debug, Clone)]
pub struct Player<Id> {
    id: Id,
    chips: u32,
    round_bets: u32,
    stage_bets: u32,
    unpaid_bets: u32,
    last_action: Option<Action>,
    with_allin: bool,
    dif: u32,
    abilities: Abilities,
    hand: CardSet,
    combo: Option<Combination>,
}

impl<Id> Player<Id> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            chips: 0,
            round_bets: 0,
            stage_bets: 0,
            unpaid_bets: 0,
            last_action: None,
            with_allin: false,
            dif: 0,
            abilities: Abilities::default(),
            hand: CardSet::hand(),
            combo: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn round_bets(&self) -> u32 {
        self.round_bets
    }
    pub fn stage_bets(&self) -> u32 {
        self.stage_bets
    }
    /// Contribution not yet credited back by a settlement.
    pub fn unpaid_bets(&self) -> u32 {
        self.unpaid_bets
    }
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }
    pub fn is_all_in(&self) -> bool {
        self.with_allin
    }
    pub fn dif(&self) -> u32 {
        self.dif
    }
    pub fn abilities(&self) -> &Abilities {
        &self.abilities
    }
    pub fn hand(&self) -> &CardSet {
        &self.hand
    }
    pub fn combo(&self) -> Option<&Combination> {
        self.combo.as_ref()
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub fn new_round(&mut self) {
        self.round_bets = 0;
        self.unpaid_bets = 0;
        self.combo = None;
        self.hand.clear();
        self.with_allin = false;
    }

    pub fn new_stage(&mut self) {
        self.stage_bets = 0;
        self.dif = 0;
        self.last_action = None;
    }

    pub fn update_dif(&mut self, max_round_bet: u32) {
        self.dif = max_round_bet.saturating_sub(self.round_bets);
    }

    /// Recomputes the menu from the current stack and `dif`.
    pub fn update_abilities(&mut self) {
        self.abilities = rules::abilities(self.chips, self.dif);
    }

    /// Validates and performs an action. Nothing changes on `Err`.
    ///
    /// ```
    /// use holdem_engine::player::{Action, ActionKind, Player};
    ///
    /// let mut player = Player::new("sam");
    /// player.add_chips(60);
    /// player.update_abilities();
    /// let posted = player.apply(ActionKind::BlindBet, 200).unwrap();
    /// assert_eq!(posted, Action { kind: ActionKind::AllIn, bet: 60 });
    /// assert!(player.is_all_in());
    /// ```
    pub fn apply(&mut self, kind: ActionKind, bet: u32) -> Result<Action, ActionError> {
        let validated = rules::validate_action(self.chips, self.dif, &self.abilities, kind, bet)?;
        let action = match validated {
            ValidatedAction::Fold => Action { kind, bet: 0 },
            ValidatedAction::Check => Action { kind, bet: 0 },
            ValidatedAction::Commit { kind, amount } => {
                self.commit(amount);
                Action { kind, bet: amount }
            }
            ValidatedAction::AllIn(amount) => {
                self.commit(amount);
                self.with_allin = true;
                Action {
                    kind: ActionKind::AllIn,
                    bet: amount,
                }
            }
        };
        self.last_action = Some(action);
        Ok(action)
    }

    fn commit(&mut self, amount: u32) {
        self.chips -= amount;
        self.round_bets += amount;
        self.stage_bets += amount;
        self.unpaid_bets += amount;
    }

    /// Deals a fresh pair of hole cards.
    pub fn take_cards<S: CardSource + ?Sized>(&mut self, source: &mut S) -> Result<(), DeckError> {
        self.hand.clear();
        self.hand.pull_from(source, CardSet::HAND)
    }

    /// Evaluates the hole cards against `table` and keeps the result.
    pub fn evaluate(&mut self, table: &CardSet) -> Result<&Combination, EvalError> {
        let combo = evaluate_with_hole(table.cards(), self.hand.cards())?;
        Ok(self.combo.insert(combo))
    }

    /// Credits a settlement payout and closes the contribution.
    pub(crate) fn settle(&mut self, credit: u32) {
        self.chips = self.chips.saturating_add(credit);
        self.unpaid_bets = 0;
    }
}
