use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::cards::CardSet;
use crate::deck::CardSource;
use crate::errors::{ActionError, ConfigError, DeckError, EvalError};
use crate::hand::Combination;
use crate::player::{Action, ActionKind, Player, PlayerId};
use crate::pot::{self, Settlement, Stake};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Seats, turn order and betting-round bookkeeping.
///
/// Seats are indices into the players in construction order. `order` is the
/// rotation for the current round with both blinds at its end, `involved` the
/// part of it that has not folded, and the current actor is an index into
/// `involved`.
#[derive(Debug, Clone)]
pub struct Table<Id> {
    players: Vec<Player<Id>>,
    circle: Vec<usize>,
    order: Vec<usize>,
    involved: Vec<usize>,
    current: usize,
    max_round_bet: u32,
    small_blind: Option<usize>,
}

impl<Id: PlayerId> Table<Id> {
    /// Seats `ids` with `chips` each. `order` is the initial rotation, a
    /// permutation of the seat indices.
    pub fn new(chips: u32, ids: Vec<Id>, order: Vec<usize>) -> Result<Self, ConfigError> {
        if chips == 0 {
            return Err(ConfigError::ZeroChips);
        }
        let players = ids
            .into_iter()
            .map(|id| {
                let mut player = Player::new(id);
                player.add_chips(chips);
                player
            })
            .collect();
        Self::from_players(players, order)
    }

    pub fn with_random_order<R: Rng + ?Sized>(chips: u32, ids: Vec<Id>, rng: &mut R) -> Result<Self, ConfigError> {
        let mut order: Vec<usize> = (0..ids.len()).collect();
        order.shuffle(rng);
        Self::new(chips, ids, order)
    }

    /// Seats prepared players, stacks as they are.
    pub fn from_players(players: Vec<Player<Id>>, order: Vec<usize>) -> Result<Self, ConfigError> {
        let count = players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.id() == player.id()) {
                return Err(ConfigError::DuplicatePlayer);
            }
        }
        // pots and payouts are summed in u32
        let total: u64 = players.iter().map(|p| u64::from(p.chips())).sum();
        if total > u64::from(u32::MAX) {
            return Err(ConfigError::ChipTotal { total });
        }
        let mut sorted = order.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(0..count) {
            return Err(ConfigError::InvalidOrder { players: count });
        }
        Ok(Self {
            players,
            circle: order.clone(),
            involved: order.clone(),
            order,
            current: 0,
            max_round_bet: 0,
            small_blind: None,
        })
    }

    pub fn players(&self) -> &[Player<Id>] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player<Id>> {
        self.players.get(seat)
    }

    pub fn seat_of(&self, id: &Id) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn involved(&self) -> &[usize] {
        &self.involved
    }

    pub fn is_involved(&self, seat: usize) -> bool {
        self.involved.contains(&seat)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_seat(&self) -> Option<usize> {
        self.involved.get(self.current).copied()
    }

    pub fn current(&self) -> Option<&Player<Id>> {
        self.current_seat().map(|seat| &self.players[seat])
    }

    pub fn max_round_bet(&self) -> u32 {
        self.max_round_bet
    }

    pub fn small_blind_seat(&self) -> Option<usize> {
        self.small_blind
    }

    /// Chips committed this round by everybody.
    pub fn bank(&self) -> u32 {
        self.players.iter().map(|p| p.round_bets()).sum()
    }

    pub fn involved_count(&self) -> usize {
        self.involved.len()
    }

    /// Players still holding chips.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.chips() > 0).count()
    }

    pub fn new_round(&mut self) {
        for player in &mut self.players {
            player.new_round();
            player.new_stage();
        }
        self.change_order();
        self.involved = self.order.clone();
        self.current = 0;
        self.max_round_bet = 0;
    }

    /// Moves the blinds one seat on and drops players without chips.
    ///
    /// The new small blind is the first seat holding chips after the previous
    /// one, walking the initial seating. Survivors are listed from it and
    /// rotated left by two so the blinds close the order.
    pub fn change_order(&mut self) {
        let Some(previous) = self
            .small_blind
            .or_else(|| self.order.len().checked_sub(2).map(|i| self.order[i]))
        else {
            return;
        };
        let n = self.circle.len();
        let start = self.circle.iter().position(|&s| s == previous).unwrap_or(0);
        let mut order: Vec<usize> = (1..=n)
            .map(|k| self.circle[(start + k) % n])
            .filter(|&seat| self.players[seat].chips() > 0)
            .collect();
        self.small_blind = order.first().copied();
        if !order.is_empty() {
            let shift = 2 % order.len();
            order.rotate_left(shift);
        }
        self.order = order;
    }

    /// Heads-up rule: the big blind acts first after the flop.
    pub fn reverse_order(&mut self) {
        self.order.reverse();
        self.involved.reverse();
        self.current = 0;
    }

    pub fn new_stage(&mut self) {
        for player in &mut self.players {
            player.new_stage();
        }
        self.current = 0;
        self.skip_all_in();
    }

    /// Deals two hole cards to every involved seat, supply checked first.
    pub fn deal_hands<S: CardSource + ?Sized>(&mut self, source: &mut S) -> Result<(), DeckError> {
        let needed = self.involved.len() * CardSet::HAND;
        if source.remaining() < needed {
            return Err(DeckError::Short {
                needed,
                remaining: source.remaining(),
            });
        }
        for &seat in &self.involved {
            self.players[seat].take_cards(source)?;
        }
        Ok(())
    }

    /// Small blind from `involved[n-2]`, big blind from `involved[n-1]`.
    pub fn post_blinds(&mut self, small: u32, big: u32) -> Result<(Action, Action), ActionError> {
        let n = self.involved.len();
        if n < MIN_PLAYERS {
            return Err(ActionError::NotEnoughPlayers);
        }
        let small_seat = self.involved[n - 2];
        let big_seat = self.involved[n - 1];
        let posted_small = self.post(small_seat, small)?;
        let posted_big = self.post(big_seat, big)?;
        self.small_blind = Some(small_seat);
        self.current = 0;
        self.skip_all_in();
        Ok((posted_small, posted_big))
    }

    fn post(&mut self, seat: usize, amount: u32) -> Result<Action, ActionError> {
        let player = &mut self.players[seat];
        let action = player.apply(ActionKind::BlindBet, amount)?;
        self.max_round_bet = self.max_round_bet.max(player.round_bets());
        debug!(seat, amount = action.bet, kind = %action.kind, "blind posted");
        Ok(action)
    }

    /// Computes `dif` and abilities of every involved seat.
    pub fn refresh(&mut self) {
        let max = self.max_round_bet;
        for &seat in &self.involved {
            let player = &mut self.players[seat];
            player.update_dif(max);
            player.update_abilities();
        }
    }

    /// Applies an action for the current actor.
    pub fn act(&mut self, kind: ActionKind, bet: u32) -> Result<Action, ActionError> {
        let seat = self.current_seat().ok_or(ActionError::NoActionExpected)?;
        let max = self.max_round_bet;
        let player = &mut self.players[seat];
        player.update_dif(max);
        player.update_abilities();
        let action = player.apply(kind, bet)?;
        self.max_round_bet = max.max(player.round_bets());
        Ok(action)
    }

    /// Moves to the next actor, first removing the current seat when it just
    /// folded. All-in seats are skipped. Returns whether the turn wrapped
    /// around to index 0.
    pub fn next_player(&mut self, after_fold: bool) -> bool {
        if after_fold {
            if self.current < self.involved.len() {
                self.involved.remove(self.current);
            }
        } else {
            self.current += 1;
        }
        let mut wrapped = false;
        if self.current >= self.involved.len() {
            self.current = 0;
            wrapped = true;
        }
        self.skip_all_in() || wrapped
    }

    fn skip_all_in(&mut self) -> bool {
        if self.involved.iter().all(|&seat| self.players[seat].is_all_in()) {
            return false;
        }
        let mut wrapped = false;
        while self.players[self.involved[self.current]].is_all_in() {
            self.current += 1;
            if self.current >= self.involved.len() {
                self.current = 0;
                wrapped = true;
            }
        }
        wrapped
    }

    /// Betting is open while somebody who can still act owes chips.
    pub fn have_dif(&self) -> bool {
        self.involved
            .iter()
            .map(|&seat| &self.players[seat])
            .any(|p| !p.is_all_in() && p.chips() > 0 && p.round_bets() < self.max_round_bet)
    }

    /// Nobody can act any more: everyone is all-in except at most one player
    /// who already matches the biggest bet.
    pub fn global_allin(&self) -> bool {
        let open: Vec<&Player<Id>> = self
            .involved
            .iter()
            .map(|&seat| &self.players[seat])
            .filter(|p| !p.is_all_in())
            .collect();
        match open.as_slice() {
            [] => true,
            [last] => last.round_bets() >= self.max_round_bet,
            _ => false,
        }
    }

    /// Ranks the involved hands against `board` and pays the pot out.
    pub fn settle_showdown(&mut self, board: &CardSet) -> Result<Settlement<Id>, EvalError> {
        let mut best: Option<Combination> = None;
        for &seat in &self.involved {
            let combo = self.players[seat].evaluate(board)?;
            if best.as_ref().map_or(true, |b| combo > b) {
                best = Some(combo.clone());
            }
        }
        let winners: Vec<usize> = self
            .involved
            .iter()
            .copied()
            .filter(|&seat| self.players[seat].combo() == best.as_ref())
            .collect();
        Ok(self.pay_out(&winners))
    }

    /// The last involved player takes every chip in the pot.
    pub fn settle_fold(&mut self) -> Settlement<Id> {
        let winners: Vec<usize> = self.involved.iter().copied().take(1).collect();
        self.pay_out(&winners)
    }

    fn pay_out(&mut self, winners: &[usize]) -> Settlement<Id> {
        let stakes: Vec<Stake<Id>> = self
            .players
            .iter()
            .map(|p| Stake {
                id: p.id().clone(),
                amount: p.unpaid_bets(),
            })
            .collect();
        let winner_ids: Vec<Id> = winners.iter().map(|&seat| self.players[seat].id().clone()).collect();
        let settlement = pot::distribute(&stakes, &winner_ids);
        for player in &mut self.players {
            let credit = settlement.credit(player.id());
            player.settle(credit);
        }
        settlement
    }
}
