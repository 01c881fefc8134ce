//! Match discovery among visible pile tops.
//!
//! A pile top is a match when at least one other pile top, on either side of
//! the table, shows the same rank. The result is a flat list with one entry
//! per qualifying card id; which ids are in it is the contract, the order
//! they come out in is not.
//!
//! ```
//! use pile_match::cards::{Card, Face, Rank, Suit};
//! use pile_match::core::{CardId, GameState, SideState};
//! use pile_match::rules::find_matches;
//! use pile_match::zones::Pile;
//!
//! let card = |id, rank| Card::new(CardId(id), Face::new(Suit::Hearts, Rank::new(rank)));
//! let human = SideState::new(
//!     [card(10, 1)].into_iter().collect(),
//!     [Pile::singleton(card(1, 5)), Pile::singleton(card(2, 9))],
//! );
//! let automated = SideState::new(
//!     [card(11, 1)].into_iter().collect(),
//!     [Pile::singleton(card(3, 5))],
//! );
//! let state = GameState::from_sides(human, automated);
//!
//! let matches = find_matches(&state);
//! assert_eq!(matches.len(), 2);
//! assert!(matches.contains_id(CardId(1)));
//! assert!(matches.contains_id(CardId(3)));
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Rank};
use crate::core::{CardId, GameState, Side, SideMap};

/// A pile-top card that currently shares its rank with another pile top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchInfo {
    pub rank: Rank,
    pub id: CardId,
}

impl MatchInfo {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            rank: card.rank(),
            id: card.id,
        }
    }
}

/// Flat list of matched pile tops, unique by id.
///
/// Piles number in the single digits per side, so the list lives inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    entries: SmallVec<[MatchInfo; 8]>,
}

impl MatchSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchInfo> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MatchInfo] {
        &self.entries
    }

    #[must_use]
    pub fn contains_id(&self, id: CardId) -> bool {
        self.entries.iter().any(|m| m.id == id)
    }

    /// True if `card` is listed with both its id and its rank.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.entries.iter().any(|m| m.id == card.id && m.rank == card.rank())
    }

    /// Add an entry unless its id is already listed.
    ///
    /// Returns true if the entry was added.
    pub fn insert(&mut self, info: MatchInfo) -> bool {
        if self.contains_id(info.id) {
            return false;
        }
        self.entries.push(info);
        true
    }

    /// Union with another set, keeping this set's entries first.
    #[must_use]
    pub fn union(&self, other: &MatchSet) -> MatchSet {
        let mut merged = self.clone();
        for info in other.iter() {
            merged.insert(*info);
        }
        merged
    }

    /// Entries whose card is still a visible pile top.
    #[must_use]
    pub fn still_present(&self, state: &GameState) -> MatchSet {
        let tops: FxHashSet<CardId> = state.tops().map(|(_, c)| c.id).collect();
        self.entries
            .iter()
            .filter(|m| tops.contains(&m.id))
            .copied()
            .collect()
    }

    /// Sorted ids, for order-independent comparison.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.entries.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<MatchInfo> for MatchSet {
    fn from_iter<I: IntoIterator<Item = MatchInfo>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for info in iter {
            set.insert(info);
        }
        set
    }
}

/// Compute the matches among the current pile tops of both sides.
///
/// Every ordered pair of distinct piles is compared, which is quadratic in
/// the pile count; with a handful of piles per side that is cheaper than any
/// index.
#[must_use]
pub fn find_matches(state: &GameState) -> MatchSet {
    let tops: SmallVec<[&Card; 16]> = state.tops().map(|(_, card)| card).collect();
    let mut seen: FxHashSet<CardId> = FxHashSet::default();
    let mut matches = MatchSet::new();

    for (i, top_i) in tops.iter().enumerate() {
        for (j, top_j) in tops.iter().enumerate() {
            if i == j || top_i.rank() != top_j.rank() {
                continue;
            }
            if seen.insert(top_j.id) {
                matches.entries.push(MatchInfo::of(top_j));
            }
        }
    }

    matches
}

/// The match sets each side last acted on.
///
/// The human's set is refreshed by clicks, the automated side's by each
/// controller cycle. A click is checked against both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    tracked: SideMap<MatchSet>,
}

impl MatchSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with both sides tracking the current matches.
    #[must_use]
    pub fn fresh(state: &GameState) -> Self {
        Self {
            tracked: SideMap::with_value(find_matches(state)),
        }
    }

    #[must_use]
    pub fn tracked(&self, side: Side) -> &MatchSet {
        &self.tracked[side]
    }

    pub fn set_tracked(&mut self, side: Side, set: MatchSet) {
        self.tracked[side] = set;
    }

    /// Union of both sides' tracked sets.
    #[must_use]
    pub fn all(&self) -> MatchSet {
        self.tracked[Side::Human].union(&self.tracked[Side::Automated])
    }

    /// True if `card` is listed by either side with matching id and rank.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.tracked.iter().any(|(_, set)| set.contains(card))
    }

    /// True if any tracked entry of either side is still a visible top.
    #[must_use]
    pub fn any_still_present(&self, state: &GameState) -> bool {
        self.tracked
            .iter()
            .any(|(_, set)| !set.still_present(state).is_empty())
    }

    pub fn clear(&mut self) {
        self.tracked = SideMap::default();
    }
}
