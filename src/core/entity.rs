//! Card identification.
//!
//! Every physical card dealt in a game gets a unique `CardId`. Ids are
//! allocated monotonically by the deck generator and never reused within a
//! game, so a stale click that names a covered card can be detected by id.
//!
//! ## Usage
//!
//! ```
//! use pile_match::core::{CardId, IdAllocator};
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_ne!(first, second);
//! assert_eq!(first, CardId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Opaque unique identifier of a dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monotonic card id source.
///
/// Id 0 is never handed out so that a zeroed id can't collide with a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}
