use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::cards::CardSet;
use crate::context::{Context, LastAction, PlayerView, Snapshot};
use crate::deck::{CardSource, Deck};
use crate::errors::{ActionError, ConfigError, DeckError};
use crate::player::{ActionKind, PlayerId};
use crate::pot::Settlement;
use crate::settings::Settings;
use crate::table::Table;

/// High-level condition of the round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// Betting is open
    Normal,
    /// Nobody can act any more, remaining streets are dealt without betting
    AllIn,
    /// Everybody but one folded
    Fold,
    /// Hands were compared
    ShowDown,
    /// Fewer than two players hold chips
    TheEnd,
}

/// What the caller has to do next.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Point {
    ActionNeeded,
    StageNeeded,
    RoundNeeded,
    TheEnd,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Community cards on the table during this street.
    pub fn table_size(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

/// Current street and how many times its turn order wrapped around.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Stage {
    #[serde(rename = "name")]
    pub street: Street,
    pub depth: u32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            street: Street::PreFlop,
            depth: 0,
        }
    }
}

/// Texas Hold'em game state machine.
///
/// Driven by [`Engine::new_round`], [`Engine::new_stage`] and
/// [`Engine::action`]; each returns a [`Context`]. An operation called at
/// the wrong [`Point`] or with an illegal action fails and leaves the game as
/// it was.
///
/// # Examples
///
/// ```
/// use holdem_engine::deck::Deck;
/// use holdem_engine::engine::{Engine, Point};
/// use holdem_engine::player::ActionKind;
/// use holdem_engine::settings::Settings;
///
/// let settings = Settings::new(1000, 10, 20).unwrap();
/// let mut engine = Engine::new(settings, vec!["ann", "bob"], vec![0, 1], Deck::new_with_seed(7)).unwrap();
///
/// let context = engine.new_round();
/// assert!(context.is_success());
/// assert_eq!(engine.point(), Point::ActionNeeded);
///
/// // a second round can not start mid-hand
/// assert!(!engine.new_round().is_success());
///
/// let context = engine.action(ActionKind::Call, 0);
/// assert!(context.is_success());
/// ```
#[derive(Debug)]
pub struct Engine<Id: PlayerId, S = Deck> {
    settings: Settings,
    table: Table<Id>,
    board: CardSet,
    deck: S,
    state: State,
    point: Point,
    stage: Stage,
    result: Option<Settlement<Id>>,
    last_action: Option<LastAction<Id>>,
    round: u32,
}

impl<Id: PlayerId> Engine<Id, Deck> {
    /// Seat order and every shuffle come from one seed.
    pub fn seeded(settings: Settings, ids: Vec<Id>, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        settings.validate()?;
        let table = Table::with_random_order(settings.chips, ids, &mut rng)?;
        Self::from_table(settings, table, Deck::new(rng))
    }
}

impl<Id: PlayerId, S: CardSource> Engine<Id, S> {
    /// `order` is the initial seat rotation, a permutation of `0..ids.len()`.
    pub fn new(settings: Settings, ids: Vec<Id>, order: Vec<usize>, deck: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        let table = Table::new(settings.chips, ids, order)?;
        Self::from_table(settings, table, deck)
    }

    pub fn with_random_order<R: Rng + ?Sized>(
        settings: Settings,
        ids: Vec<Id>,
        deck: S,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let table = Table::with_random_order(settings.chips, ids, rng)?;
        Self::from_table(settings, table, deck)
    }

    /// Starts from a prepared table, stacks as they are.
    pub fn from_table(settings: Settings, table: Table<Id>, deck: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            table,
            board: CardSet::table(),
            deck,
            state: State::Normal,
            point: Point::RoundNeeded,
            stage: Stage::default(),
            result: None,
            last_action: None,
            round: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn table(&self) -> &Table<Id> {
        &self.table
    }
    pub fn board(&self) -> &CardSet {
        &self.board
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn result(&self) -> Option<&Settlement<Id>> {
        self.result.as_ref()
    }
    pub fn last_action(&self) -> Option<&LastAction<Id>> {
        self.last_action.as_ref()
    }
    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Resets the round, rotates the blinds, deals hole cards and posts blinds.
    ///
    /// The card source is refreshed before its supply is checked, so a
    /// rejected call still consumes a [`StackedDeck`](crate::deck::StackedDeck)
    /// round or one shuffle of the RNG. Game state itself is left as it was.
    pub fn new_round(&mut self) -> Context<Id> {
        self.transact(|engine| engine.start_round())
    }

    /// Deals the next street. Cards pulled before a rejected showdown stay
    /// out of the card source; the game state is rolled back.
    pub fn new_stage(&mut self) -> Context<Id> {
        self.transact(|engine| engine.deal_stage())
    }

    /// Plays `kind` for the current actor. `bet` only matters for raises.
    pub fn action(&mut self, kind: ActionKind, bet: u32) -> Context<Id> {
        self.transact(|engine| engine.play(kind, bet))
    }

    /// Snapshot of the current state without a transition.
    pub fn context(&self) -> Context<Id> {
        Context::success("current state", self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot<Id> {
        let current_player = match self.point {
            Point::ActionNeeded => self.table.current().map(|p| p.id().clone()),
            _ => None,
        };
        let players = self
            .table
            .players()
            .iter()
            .enumerate()
            .map(|(seat, player)| PlayerView::new(player, self.table.is_involved(seat)))
            .collect();
        Snapshot {
            round: self.round,
            point: self.point,
            state: self.state,
            stage: self.stage,
            table: self.board.cards().to_vec(),
            bank: self.table.bank(),
            result: self.result.clone(),
            last_action: self.last_action.clone(),
            current_player,
            players,
        }
    }

    fn start_round(&mut self) -> Result<&'static str, ActionError> {
        match self.point {
            Point::RoundNeeded => {}
            Point::TheEnd => return Err(ActionError::GameOver),
            Point::ActionNeeded | Point::StageNeeded => return Err(ActionError::RoundInProgress),
        }
        if self.table.active_count() < 2 {
            return Err(ActionError::NotEnoughPlayers);
        }

        self.deck.refresh();
        let needed = self.table.active_count() * CardSet::HAND;
        if self.deck.remaining() < needed {
            return Err(DeckError::Short {
                needed,
                remaining: self.deck.remaining(),
            }
            .into());
        }

        self.round += 1;
        self.table.new_round();
        self.board.clear();
        self.state = State::Normal;
        self.stage = Stage::default();
        self.result = None;
        self.table.deal_hands(&mut self.deck)?;

        let [small, big] = self.settings.blinds;
        let (_, posted) = self.table.post_blinds(small, big)?;
        self.last_action = self.table.order().last().map(|&seat| LastAction {
            identifier: self.table.players()[seat].id().clone(),
            kind: posted.kind,
            bet: posted.bet,
        });
        info!(round = self.round, players = self.table.involved_count(), order = ?self.table.order(), "round started");

        if self.table.global_allin() {
            self.state = State::AllIn;
            self.point = Point::StageNeeded;
            return Ok("blinds committed everybody");
        }
        self.await_action();
        Ok("round started")
    }

    fn deal_stage(&mut self) -> Result<&'static str, ActionError> {
        match self.point {
            Point::StageNeeded => {}
            Point::TheEnd => return Err(ActionError::GameOver),
            Point::ActionNeeded | Point::RoundNeeded => return Err(ActionError::NoStageExpected),
        }
        let street = self.stage.street.next().ok_or(ActionError::NoStageExpected)?;
        let needed = street.table_size() - self.board.len();
        if self.deck.remaining() < needed {
            return Err(DeckError::Short {
                needed,
                remaining: self.deck.remaining(),
            }
            .into());
        }

        self.stage = Stage { street, depth: 0 };
        if street == Street::Flop && self.table.order().len() == 2 {
            self.table.reverse_order();
        }
        self.table.new_stage();
        self.board.pull_from(&mut self.deck, needed)?;
        info!(round = self.round, street = ?street, table = %self.board, "stage dealt");

        if self.state == State::AllIn {
            if street == Street::River {
                self.showdown()?;
                return Ok("showdown");
            }
            self.point = Point::StageNeeded;
            return Ok("stage dealt without betting");
        }
        self.await_action();
        Ok("stage dealt")
    }

    fn play(&mut self, kind: ActionKind, bet: u32) -> Result<&'static str, ActionError> {
        match self.point {
            Point::ActionNeeded => {}
            Point::TheEnd => return Err(ActionError::GameOver),
            Point::StageNeeded | Point::RoundNeeded => return Err(ActionError::NoActionExpected),
        }
        let seat = self.table.current_seat().ok_or(ActionError::NoActionExpected)?;
        let action = self.table.act(kind, bet)?;
        let identifier = self.table.players()[seat].id().clone();
        debug!(
            round = self.round,
            player = ?identifier,
            kind = %action.kind,
            bet = action.bet,
            depth = self.stage.depth,
            "action accepted"
        );
        self.last_action = Some(LastAction {
            identifier,
            kind: action.kind,
            bet: action.bet,
        });

        let folded = action.kind == ActionKind::Fold;
        if self.table.next_player(folded) {
            self.stage.depth += 1;
        }

        if folded && self.table.involved_count() == 1 {
            self.state = State::Fold;
            let settlement = self.table.settle_fold();
            self.finish_round(settlement);
            return Ok("everybody else folded");
        }

        if self.table.global_allin() {
            self.state = State::AllIn;
        }
        let open = self.state != State::AllIn && (self.table.have_dif() || self.stage.depth == 0);
        if open {
            self.await_action();
            return Ok("action accepted");
        }
        if self.stage.street == Street::River {
            self.showdown()?;
            return Ok("showdown");
        }
        self.point = Point::StageNeeded;
        Ok("stage finished")
    }

    fn await_action(&mut self) {
        self.table.refresh();
        self.point = Point::ActionNeeded;
    }

    fn showdown(&mut self) -> Result<(), ActionError> {
        let settlement = self.table.settle_showdown(&self.board)?;
        self.state = State::ShowDown;
        self.finish_round(settlement);
        Ok(())
    }

    fn finish_round(&mut self, settlement: Settlement<Id>) {
        info!(
            round = self.round,
            winners = ?settlement.winners,
            losers = ?settlement.losers,
            "round settled"
        );
        self.result = Some(settlement);
        if self.table.active_count() < 2 {
            self.state = State::TheEnd;
            self.point = Point::TheEnd;
            info!(round = self.round, "game over");
        } else {
            self.point = Point::RoundNeeded;
        }
    }

    /// Runs `step` and puts everything but the card source back when it fails.
    fn transact<F>(&mut self, step: F) -> Context<Id>
    where
        F: FnOnce(&mut Self) -> Result<&'static str, ActionError>,
    {
        let saved = Saved {
            table: self.table.clone(),
            board: self.board.clone(),
            state: self.state,
            point: self.point,
            stage: self.stage,
            result: self.result.clone(),
            last_action: self.last_action.clone(),
            round: self.round,
        };
        match step(self) {
            Ok(description) => Context::success(description, self.snapshot()),
            Err(error) => {
                debug!(round = saved.round, %error, "operation rejected");
                self.table = saved.table;
                self.board = saved.board;
                self.state = saved.state;
                self.point = saved.point;
                self.stage = saved.stage;
                self.result = saved.result;
                self.last_action = saved.last_action;
                self.round = saved.round;
                Context::failure(error)
            }
        }
    }
}

struct Saved<Id: PlayerId> {
    table: Table<Id>,
    board: CardSet,
    state: State,
    point: Point,
    stage: Stage,
    result: Option<Settlement<Id>>,
    last_action: Option<LastAction<Id>>,
    round: u32,
}
