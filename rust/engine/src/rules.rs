use serde::Serialize;

use crate::errors::ActionError;
use crate::player::ActionKind;

/// Allowed raise amounts, inclusive. `0..=0` means no raise is possible.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize)]
pub struct RaiseRange {
    pub min: u32,
    pub max: u32,
}

impl RaiseRange {
    pub fn is_empty(&self) -> bool {
        self.max == 0
    }

    pub fn contains(&self, bet: u32) -> bool {
        !self.is_empty() && (self.min..=self.max).contains(&bet)
    }
}

/// Legal-action menu of a player for the current bet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Abilities {
    pub raise: RaiseRange,
    /// Chips a call would commit, zero when calling is not possible.
    pub call: u32,
    pub check: bool,
}

impl Abilities {
    /// Whether `kind` with `bet` passes validation. Blinds and folds always do.
    pub fn allows(&self, kind: ActionKind, bet: u32) -> bool {
        match kind {
            ActionKind::BlindBet | ActionKind::Fold => true,
            ActionKind::Raise => self.raise.contains(bet),
            ActionKind::Call => self.call > 0,
            ActionKind::Check => self.check,
            ActionKind::AllIn => false,
        }
    }
}

/// Derives the legal-action menu from a stack and the amount still owed.
///
/// ```
/// use holdem_engine::rules::{abilities, RaiseRange};
///
/// let facing = abilities(500, 100);
/// assert_eq!(facing.raise, RaiseRange { min: 101, max: 500 });
/// assert_eq!(facing.call, 100);
/// assert!(!facing.check);
///
/// let open = abilities(500, 0);
/// assert_eq!(open.raise, RaiseRange { min: 1, max: 500 });
/// assert_eq!(open.call, 0);
/// assert!(open.check);
/// ```
pub fn abilities(chips: u32, dif: u32) -> Abilities {
    let raise = if chips > dif {
        RaiseRange {
            min: dif + 1,
            max: chips,
        }
    } else {
        RaiseRange::default()
    };
    let call = if dif > 0 { chips.min(dif) } else { 0 };
    Abilities {
        raise,
        call,
        check: dif == 0,
    }
}

/// What a validated action does to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Moves `amount` chips and leaves some behind.
    Commit { kind: ActionKind, amount: u32 },
    /// Moves the whole stack.
    AllIn(u32),
}

/// Validates a player action against the legal-action menu.
///
/// `bet` is the number of chips added now, not a raise-by amount, and is
/// ignored for calls, checks and folds. A raise, blind or call the stack can
/// not fully fund becomes [`ValidatedAction::AllIn`].
///
/// # Arguments
///
/// * `chips` - Player's remaining stack
/// * `dif` - Chips needed to match the current maximum round bet
/// * `abilities` - Menu derived by [`abilities`] for the same `chips` and `dif`
/// * `kind` - The action the player wishes to perform
/// * `bet` - Chips for raises and blinds
///
/// # Errors
///
/// - [`ActionError::UnsupportedKind`] - `all-in` was submitted, it is only ever produced
/// - [`ActionError::ZeroBet`] - raise or blind without chips
/// - [`ActionError::RaiseRange`] - raise outside the allowed range
/// - [`ActionError::CallUnavailable`] - nothing to call, or nothing left to call with
/// - [`ActionError::CheckUnavailable`] - there is a bet to answer
///
/// # Examples
///
/// ```
/// use holdem_engine::player::ActionKind;
/// use holdem_engine::rules::{abilities, validate_action, ValidatedAction};
///
/// let menu = abilities(1000, 50);
/// let call = validate_action(1000, 50, &menu, ActionKind::Call, 0);
/// assert_eq!(call, Ok(ValidatedAction::Commit { kind: ActionKind::Call, amount: 50 }));
///
/// // raising the whole stack is an all-in
/// let shove = validate_action(1000, 50, &menu, ActionKind::Raise, 1000);
/// assert_eq!(shove, Ok(ValidatedAction::AllIn(1000)));
///
/// assert!(validate_action(1000, 50, &menu, ActionKind::Check, 0).is_err());
/// ```
pub fn validate_action(
    chips: u32,
    dif: u32,
    abilities: &Abilities,
    kind: ActionKind,
    bet: u32,
) -> Result<ValidatedAction, ActionError> {
    match kind {
        ActionKind::AllIn => Err(ActionError::UnsupportedKind(kind)),
        ActionKind::Fold => Ok(ValidatedAction::Fold),
        ActionKind::Check => {
            if abilities.check {
                Ok(ValidatedAction::Check)
            } else {
                Err(ActionError::CheckUnavailable { dif })
            }
        }
        ActionKind::Call => {
            if abilities.call == 0 {
                return Err(ActionError::CallUnavailable);
            }
            Ok(commit(chips, kind, dif))
        }
        ActionKind::Raise => {
            if bet == 0 {
                return Err(ActionError::ZeroBet(kind));
            }
            if !abilities.raise.contains(bet) {
                return Err(ActionError::RaiseRange {
                    bet,
                    min: abilities.raise.min,
                    max: abilities.raise.max,
                });
            }
            Ok(commit(chips, kind, bet))
        }
        ActionKind::BlindBet => {
            if bet == 0 {
                return Err(ActionError::ZeroBet(kind));
            }
            Ok(commit(chips, kind, bet))
        }
    }
}

fn commit(chips: u32, kind: ActionKind, amount: u32) -> ValidatedAction {
    if chips > amount {
        ValidatedAction::Commit { kind, amount }
    } else {
        ValidatedAction::AllIn(chips)
    }
}
