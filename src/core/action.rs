//! Action representation: what a side does to the table.
//!
//! Targets are plain data. A `PileLocator` names a pile by side and index,
//! and a placement also carries the id of the card the actor saw on top, so
//! a click that arrives after the pile changed is recognisably stale.
//!
//! ## Example
//!
//! ```
//! use pile_match::core::{Action, CardId, PileLocator, Side};
//!
//! let target = PileLocator::new(Side::Automated, 2);
//! let place = Action::place(Side::Human, target, CardId(17));
//!
//! assert_eq!(place.actor(), Some(Side::Human));
//! assert_eq!(Action::Redeal.actor(), None);
//! ```

use serde::{Deserialize, Serialize};

use super::entity::CardId;
use super::side::Side;

/// Address of one side pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileLocator {
    /// Side whose row the pile sits in.
    pub side: Side,
    /// Position of the pile within that row.
    pub index: usize,
}

impl PileLocator {
    #[must_use]
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

impl std::fmt::Display for PileLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// A complete game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put the top card of `actor`'s hand onto the pile at `target`,
    /// whose top card must still be `card`.
    Place {
        actor: Side,
        target: PileLocator,
        card: CardId,
    },
    /// Recycle all pile cards into the hands and deal fresh piles.
    Redeal,
}

impl Action {
    #[must_use]
    pub const fn place(actor: Side, target: PileLocator, card: CardId) -> Self {
        Action::Place { actor, target, card }
    }

    /// The side performing the action, if it belongs to one.
    #[must_use]
    pub const fn actor(&self) -> Option<Side> {
        match self {
            Action::Place { actor, .. } => Some(*actor),
            Action::Redeal => None,
        }
    }
}

/// A recorded action with its position in the game history.
///
/// Used for replay and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Order of the action within the game (starts at 0).
    pub sequence: u32,

    /// Card moved out of the actor's hand, for placements.
    pub placed: Option<CardId>,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, sequence: u32, placed: Option<CardId>) -> Self {
        Self {
            action,
            sequence,
            placed,
        }
    }
}
