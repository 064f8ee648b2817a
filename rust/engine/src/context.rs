use serde::Serialize;

use crate::cards::Card;
use crate::engine::{Point, Stage, State};
use crate::errors::ActionError;
use crate::hand::Combination;
use crate::player::{Action, ActionKind, Player, PlayerId};
use crate::pot::Settlement;
use crate::rules::Abilities;

/// Outcome of one engine operation.
///
/// On failure only `description` (and the typed `error`) are set; the engine
/// state is unchanged and the caller should prompt again.
#[derive(Debug, Clone, Serialize)]
pub struct Context<Id: PlayerId> {
    pub success: bool,
    pub description: String,
    #[serde(flatten)]
    pub snapshot: Option<Snapshot<Id>>,
    #[serde(skip)]
    pub error: Option<ActionError>,
}

impl<Id: PlayerId> Context<Id> {
    pub(crate) fn success(description: &str, snapshot: Snapshot<Id>) -> Self {
        Self {
            success: true,
            description: description.to_string(),
            snapshot: Some(snapshot),
            error: None,
        }
    }

    pub(crate) fn failure(error: ActionError) -> Self {
        Self {
            success: false,
            description: error.to_string(),
            snapshot: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn snapshot(&self) -> Option<&Snapshot<Id>> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&ActionError> {
        self.error.as_ref()
    }
}

impl<Id: PlayerId + Serialize> Context<Id> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Owned copy of the game after a transition. Every seat is shown with all
/// of its fields, hole cards included; redacting is up to the front-end.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<Id: PlayerId> {
    pub round: u32,
    pub point: Point,
    pub state: State,
    pub stage: Stage,
    /// Community cards
    pub table: Vec<Card>,
    pub bank: u32,
    pub result: Option<Settlement<Id>>,
    pub last_action: Option<LastAction<Id>>,
    /// Set only while an action is expected
    pub current_player: Option<Id>,
    /// In seat order
    pub players: Vec<PlayerView<Id>>,
}

impl<Id: PlayerId> Snapshot<Id> {
    pub fn player(&self, id: &Id) -> Option<&PlayerView<Id>> {
        self.players.iter().find(|p| &p.identifier == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastAction<Id> {
    pub identifier: Id,
    pub kind: ActionKind,
    pub bet: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView<Id> {
    pub identifier: Id,
    pub chips: u32,
    pub round_bets: u32,
    pub stage_bets: u32,
    pub dif: u32,
    pub abilities: Abilities,
    pub cards: Vec<Card>,
    pub combo: Option<Combination>,
    pub last_action: Option<Action>,
    pub with_allin: bool,
    /// Still contesting the pot this round
    pub involved: bool,
}

impl<Id: Clone> PlayerView<Id> {
    pub(crate) fn new(player: &Player<Id>, involved: bool) -> Self {
        Self {
            identifier: player.id().clone(),
            chips: player.chips(),
            round_bets: player.round_bets(),
            stage_bets: player.stage_bets(),
            dif: player.dif(),
            abilities: *player.abilities(),
            cards: player.hand().cards().to_vec(),
            combo: player.combo().cloned(),
            last_action: player.last_action(),
            with_allin: player.is_all_in(),
            involved,
        }
    }
}
