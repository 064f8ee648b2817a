use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Chips one player put into the pot this round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stake<Id> {
    pub id: Id,
    pub amount: u32,
}

/// Outcome of a round, keyed by player.
///
/// `winners` holds gross payouts, `losers` the chips lost by every other
/// contributor (folded players included) and `refunds` the uncontested
/// overbets handed back. Payouts plus refunds add up to the pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement<Id: Eq + Hash> {
    pub winners: HashMap<Id, u32>,
    pub losers: HashMap<Id, u32>,
    pub refunds: HashMap<Id, u32>,
}

impl<Id: Eq + Hash> Settlement<Id> {
    pub fn pot(&self) -> u32 {
        self.winners.values().sum::<u32>() + self.refunds.values().sum::<u32>()
    }

    /// Chips credited back to `id`: payout plus refund.
    pub fn credit(&self, id: &Id) -> u32 {
        self.winners.get(id).copied().unwrap_or(0) + self.refunds.get(id).copied().unwrap_or(0)
    }
}

/// Splits the pot among `winners`, listed in seating order.
///
/// A loser who put in more than the biggest winner contribution gets the
/// excess back. The rest is paid out in layers, one per distinct winner
/// contribution from the smallest up: each layer collects what every stake
/// holds between the previous level and this one and is split evenly among
/// the winners who reached it. Odd chips go one each to those winners in
/// list order.
///
/// ```
/// use holdem_engine::pot::{distribute, Stake};
///
/// let stakes = [
///     Stake { id: "short", amount: 300 },
///     Stake { id: "mid", amount: 600 },
///     Stake { id: "deep", amount: 1400 },
/// ];
/// let settlement = distribute(&stakes, &["short"]);
/// assert_eq!(settlement.winners["short"], 900);
/// assert_eq!(settlement.refunds["mid"], 300);
/// assert_eq!(settlement.refunds["deep"], 1100);
/// assert_eq!(settlement.losers["deep"], 300);
/// ```
pub fn distribute<Id: Clone + Eq + Hash>(stakes: &[Stake<Id>], winners: &[Id]) -> Settlement<Id> {
    let contribution = |id: &Id| -> u32 { stakes.iter().filter(|s| &s.id == id).map(|s| s.amount).sum() };
    let cover = winners.iter().map(contribution).max().unwrap_or(0);

    let mut refunds = HashMap::new();
    let mut losers = HashMap::new();
    for stake in stakes.iter().filter(|s| !winners.contains(&s.id)) {
        let refund = stake.amount.saturating_sub(cover);
        if refund > 0 {
            refunds.insert(stake.id.clone(), refund);
        }
        if stake.amount > 0 {
            losers.insert(stake.id.clone(), stake.amount - refund);
        }
    }

    let mut levels: Vec<u32> = winners.iter().map(contribution).filter(|&c| c > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut payouts: HashMap<Id, u32> = winners.iter().map(|id| (id.clone(), 0)).collect();
    let mut floor = 0;
    for level in levels {
        let mass: u32 = stakes
            .iter()
            .map(|s| s.amount.min(level) - s.amount.min(floor))
            .sum();
        let eligible: Vec<&Id> = winners.iter().filter(|id| contribution(*id) >= level).collect();
        let count = eligible.len() as u32;
        let share = mass / count;
        let odd = (mass % count) as usize;
        for (i, id) in eligible.into_iter().enumerate() {
            let extra = u32::from(i < odd);
            if let Some(total) = payouts.get_mut(id) {
                *total += share + extra;
            }
        }
        floor = level;
    }

    Settlement {
        winners: payouts,
        losers,
        refunds,
    }
}
