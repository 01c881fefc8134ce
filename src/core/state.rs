//! Game state: both sides' hands and piles, the winner and the history.
//!
//! ## GameState
//!
//! An immutable-by-convention value built on `im` persistent collections.
//! Rules never mutate a state in place; they clone it (O(1)), change the
//! clone and hand it back, so callers can hold pre- and post-move states
//! side by side without aliasing.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord, PileLocator};
use super::entity::{CardId, IdAllocator};
use super::side::{Side, SideMap};
use crate::cards::{Card, Provenance};
use crate::zones::{Hand, Pile};

/// One side of the table: its hand and its row of piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    pub hand: Hand,
    pub piles: Vector<Pile>,
}

impl SideState {
    #[must_use]
    pub fn new(hand: Hand, piles: impl IntoIterator<Item = Pile>) -> Self {
        Self {
            hand,
            piles: piles.into_iter().collect(),
        }
    }

    /// Cards held by this side, hand and piles together.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.piles.iter().map(Pile::len).sum::<usize>()
    }
}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    sides: SideMap<SideState>,

    /// Side whose hand ran out first. Set once; freezes the game.
    won_by: Option<Side>,

    /// Accepted actions, in order.
    history: Vector<ActionRecord>,

    /// Source of fresh card ids.
    ids: IdAllocator,
}

impl GameState {
    /// Assemble a state from both sides.
    ///
    /// `ids` must already have issued every id present on the table.
    #[must_use]
    pub fn new(human: SideState, automated: SideState, ids: IdAllocator) -> Self {
        Self {
            sides: SideMap::from_parts(human, automated),
            won_by: None,
            history: Vector::new(),
            ids,
        }
    }

    /// Assemble a state from hand-built sides, e.g. a fixed table layout.
    ///
    /// The id allocator is advanced past the largest id on the table.
    #[must_use]
    pub fn from_sides(human: SideState, automated: SideState) -> Self {
        let max_id = [&human, &automated]
            .into_iter()
            .flat_map(|s| s.hand.iter().chain(s.piles.iter().flat_map(Pile::iter)))
            .map(|c| c.id.raw())
            .max()
            .unwrap_or(0);

        let mut ids = IdAllocator::new();
        while ids.issued() < max_id {
            ids.alloc();
        }

        Self::new(human, automated, ids)
    }

    // === Sides ===

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.sides[side].hand
    }

    #[must_use]
    pub fn hand_size(&self, side: Side) -> usize {
        self.sides[side].hand.len()
    }

    #[must_use]
    pub fn piles(&self, side: Side) -> &Vector<Pile> {
        &self.sides[side].piles
    }

    #[must_use]
    pub fn pile(&self, locator: PileLocator) -> Option<&Pile> {
        self.sides[locator.side].piles.get(locator.index)
    }

    pub(crate) fn pile_mut(&mut self, locator: PileLocator) -> Option<&mut Pile> {
        self.sides[locator.side].piles.get_mut(locator.index)
    }

    /// Visible card of the pile at `locator`.
    #[must_use]
    pub fn top_at(&self, locator: PileLocator) -> Option<&Card> {
        self.pile(locator)?.top()
    }

    /// Every visible pile top with its locator: human row first, then the
    /// automated row, each left to right. Empty piles are skipped.
    pub fn tops(&self) -> impl Iterator<Item = (PileLocator, &Card)> + '_ {
        Side::ALL.into_iter().flat_map(move |side| {
            self.sides[side]
                .piles
                .iter()
                .enumerate()
                .filter_map(move |(index, pile)| {
                    pile.top().map(|card| (PileLocator::new(side, index), card))
                })
        })
    }

    /// Find the pile whose top card is `id`.
    #[must_use]
    pub fn locate_top(&self, id: CardId) -> Option<PileLocator> {
        self.tops().find(|(_, card)| card.id == id).map(|(loc, _)| loc)
    }

    /// Number of piles across both sides.
    #[must_use]
    pub fn pile_count(&self) -> usize {
        Side::ALL.iter().map(|&s| self.sides[s].piles.len()).sum()
    }

    /// Cards on the whole table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        Side::ALL.iter().map(|&s| self.sides[s].total_cards()).sum()
    }

    /// Every card on the table, hands first, for accounting.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        Side::ALL.into_iter().flat_map(move |side| {
            let state = &self.sides[side];
            state.hand.iter().chain(state.piles.iter().flat_map(Pile::iter))
        })
    }

    /// Set the provenance of a pile card wherever it sits.
    ///
    /// Returns true if the card was found and its tag changed.
    pub(crate) fn retag(&mut self, id: CardId, provenance: Provenance) -> bool {
        for side in Side::ALL {
            for pile in self.sides[side].piles.iter_mut() {
                if pile.iter().any(|c| c.id == id) {
                    return pile.retag(id, provenance);
                }
            }
        }
        false
    }

    // === Outcome ===

    #[must_use]
    pub fn won_by(&self) -> Option<Side> {
        self.won_by
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.won_by.is_some()
    }

    pub(crate) fn set_won_by(&mut self, side: Side) {
        debug_assert!(self.won_by.is_none(), "winner recorded twice");
        self.won_by = Some(side);
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Append `action` to the history and return its sequence number.
    pub(crate) fn record(&mut self, action: Action, placed: Option<CardId>) -> u32 {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(action, sequence, placed));
        sequence
    }

    /// Sequence number of the most recent placement of `card`.
    #[must_use]
    pub fn last_placement_of(&self, card: CardId) -> Option<u32> {
        self.history
            .iter()
            .rev()
            .find(|record| record.placed == Some(card))
            .map(|record| record.sequence)
    }

    /// Ids issued so far in this game.
    #[must_use]
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }
}
