use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::cards::{Card, Rank};
use crate::errors::EvalError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPairs = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPairs => "two pairs",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Category::HighCard => "hc",
            Category::OnePair => "op",
            Category::TwoPairs => "tp",
            Category::ThreeOfAKind => "tK",
            Category::Straight => "st",
            Category::Flush => "fl",
            Category::FullHouse => "fh",
            Category::FourOfAKind => "fK",
            Category::StraightFlush => "sf",
        }
    }
}

/// How much of a combination is backed by the holder's hole cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ratio {
    Real,
    Half,
    Miss,
}

/// Cards defining one part of a combination: the trip of a full house, one
/// of the two pairs, or the whole run for single-group categories.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Group {
    pub cards: Vec<Card>,
    pub from_hole: bool,
}

/// Result of evaluating 2 to 7 cards.
///
/// Ordering compares the category first and then the best cards rank by rank.
/// Suits and groups never take part in comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Combination {
    category: Category,
    cards: Vec<Card>,
    groups: Vec<Group>,
    ratio: Option<Ratio>,
}

impl Combination {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Best cards in tie-break order, at most five.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Only set by [`evaluate_with_hole`].
    pub fn ratio(&self) -> Option<Ratio> {
        self.ratio
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Combination {}

impl PartialOrd for Combination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Combination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.cards.cmp(&other.cards))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category.name())?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str(")")
    }
}

/// Evaluates loose cards, no ratio.
///
/// ```
/// use holdem_engine::cards::CardSet;
/// use holdem_engine::hand::{evaluate, Category};
///
/// let cards = CardSet::parse("Kc/Qh/Jd/Ts/6h/5c/5h", 7).unwrap();
/// let combo = evaluate(cards.cards()).unwrap();
/// assert_eq!(combo.category(), Category::OnePair);
/// assert_eq!(combo.to_string(), "one pair (5c/5h/Kc/Qh/Jd)");
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Combination, EvalError> {
    let seen = cards.iter().map(|&card| Seen { card, hole: false }).collect();
    Ok(classify(checked(seen)?))
}

/// Evaluates table plus hole cards and classifies the [`Ratio`].
pub fn evaluate_with_hole(table: &[Card], hole: &[Card]) -> Result<Combination, EvalError> {
    let seen = table
        .iter()
        .map(|&card| Seen { card, hole: false })
        .chain(hole.iter().map(|&card| Seen { card, hole: true }))
        .collect();
    let mut combo = classify(checked(seen)?);
    combo.ratio = Some(ratio_of(&combo.groups));
    Ok(combo)
}

#[derive(Debug, Copy, Clone)]
struct Seen {
    card: Card,
    hole: bool,
}

fn checked(seen: Vec<Seen>) -> Result<Vec<Seen>, EvalError> {
    if !(2..=7).contains(&seen.len()) {
        return Err(EvalError::CardCount(seen.len()));
    }
    for (i, s) in seen.iter().enumerate() {
        if s.card.rank == Rank::LowAce {
            return Err(EvalError::SyntheticCard);
        }
        if seen[..i].iter().any(|p| p.card.same_card(&s.card)) {
            return Err(EvalError::DuplicateCard(s.card));
        }
    }
    Ok(seen)
}

fn classify(mut seen: Vec<Seen>) -> Combination {
    // highest first; stable so equal ranks keep table-then-hole order
    seen.sort_by(|a, b| b.card.cmp(&a.card));

    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    for s in &seen {
        rank_counts[s.card.rank.value() as usize] += 1;
        suit_counts[s.card.suit.index()] += 1;
    }

    if let Some(suit) = (0..4).find(|&s| suit_counts[s] >= 5) {
        let suited: Vec<Seen> = seen
            .iter()
            .filter(|s| s.card.suit.index() == suit)
            .copied()
            .collect();
        if let Some(run) = straight_run(&suited) {
            return single(Category::StraightFlush, run);
        }
        return single(Category::Flush, suited[..5].to_vec());
    }

    let (quads, trips, pairs) = classify_multiples(&rank_counts);

    if let Some(&quad) = quads.first() {
        let members = of_rank(&seen, quad);
        return grouped(Category::FourOfAKind, &seen, vec![members], 1);
    }

    if let Some(&three) = trips.first() {
        // a second trip plays as the pair when it beats the best pair
        let two = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
        if let Some(two) = two {
            let triple = of_rank(&seen, three);
            let double = of_rank(&seen, two);
            let cards = triple
                .iter()
                .chain(double.iter().take(2))
                .map(|s| s.card)
                .collect();
            return Combination {
                category: Category::FullHouse,
                cards,
                groups: vec![group(&triple), group(&double)],
                ratio: None,
            };
        }
    }

    if let Some(run) = straight_run(&seen) {
        return single(Category::Straight, run);
    }

    if let Some(&three) = trips.first() {
        let members = of_rank(&seen, three);
        return grouped(Category::ThreeOfAKind, &seen, vec![members], 2);
    }

    if let [high, low, ..] = pairs.as_slice() {
        let groups = vec![of_rank(&seen, *high), of_rank(&seen, *low)];
        return grouped(Category::TwoPairs, &seen, groups, 1);
    }

    if let Some(&pair) = pairs.first() {
        let members = of_rank(&seen, pair);
        return grouped(Category::OnePair, &seen, vec![members], 3);
    }

    let top = seen.iter().take(5).copied().collect();
    single(Category::HighCard, top)
}

/// Ranks with multiplicity 4, 3 and 2, each list highest first.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<Rank>, Vec<Rank>, Vec<Rank>) {
    let mut quads = vec![];
    let mut trips = vec![];
    let mut pairs = vec![];
    for r in (2..=14u8).rev() {
        let Some(rank) = Rank::from_u8(r) else {
            continue;
        };
        match rank_counts[r as usize] {
            4 => quads.push(rank),
            3 => trips.push(rank),
            2 => pairs.push(rank),
            _ => {}
        }
    }
    (quads, trips, pairs)
}

fn of_rank(seen: &[Seen], rank: Rank) -> Vec<Seen> {
    seen.iter().filter(|s| s.card.rank == rank).copied().collect()
}

fn group(members: &[Seen]) -> Group {
    Group {
        cards: members.iter().map(|s| s.card).collect(),
        from_hole: members.iter().any(|s| s.hole),
    }
}

/// Combination whose defining cards are its best cards.
fn single(category: Category, best: Vec<Seen>) -> Combination {
    Combination {
        category,
        cards: best.iter().map(|s| s.card).collect(),
        groups: vec![group(&best)],
        ratio: None,
    }
}

/// Groups followed by up to `kickers` highest cards of other ranks.
fn grouped(category: Category, seen: &[Seen], groups: Vec<Vec<Seen>>, kickers: usize) -> Combination {
    let used: Vec<Rank> = groups.iter().filter_map(|g| g.first().map(|s| s.card.rank)).collect();
    let mut cards: Vec<Card> = groups.iter().flatten().map(|s| s.card).collect();
    cards.extend(
        seen.iter()
            .filter(|s| !used.contains(&s.card.rank))
            .take(kickers)
            .map(|s| s.card),
    );
    Combination {
        category,
        cards,
        groups: groups.iter().map(|g| group(g)).collect(),
        ratio: None,
    }
}

/// Highest run of five consecutive ranks, highest card first.
///
/// An ace also occupies slot 1 as a `LowAce` carrying the same hole flag.
/// Among cards of one rank a hole card wins the slot.
fn straight_run(cards: &[Seen]) -> Option<Vec<Seen>> {
    let mut slots: [Option<Seen>; 15] = [None; 15];
    for &s in cards {
        place(&mut slots, s);
        if s.card.rank == Rank::Ace {
            let low = Card::new(Rank::LowAce, s.card.suit);
            place(&mut slots, Seen { card: low, hole: s.hole });
        }
    }
    (5..=14usize)
        .rev()
        .find_map(|high| (high - 4..=high).rev().map(|r| slots[r]).collect())
}

fn place(slots: &mut [Option<Seen>; 15], s: Seen) {
    let slot = &mut slots[s.card.rank.value() as usize];
    match slot {
        Some(existing) if existing.hole || !s.hole => {}
        _ => *slot = Some(s),
    }
}

fn ratio_of(groups: &[Group]) -> Ratio {
    let hits = groups.iter().filter(|g| g.from_hole).count();
    match (groups.len(), hits) {
        (_, 0) => Ratio::Miss,
        (1, _) => Ratio::Real,
        (n, h) if h == n => Ratio::Real,
        _ => Ratio::Half,
    }
}
