//! Placement cursor: the rank armed for a run of human placements.
//!
//! After the human clicks a matched card the cursor is armed to its rank.
//! Further clicks on cards of that rank that are still in the tracked match
//! snapshot continue the run against the snapshot; anything else refreshes
//! the snapshot first.

use serde::{Deserialize, Serialize};

use super::matches::MatchSnapshot;
use crate::cards::{Card, Rank};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCursor {
    armed: Option<Rank>,
}

impl PlacementCursor {
    #[must_use]
    pub const fn unarmed() -> Self {
        Self { armed: None }
    }

    #[must_use]
    pub const fn armed(rank: Rank) -> Self {
        Self { armed: Some(rank) }
    }

    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        self.armed
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn arm(&mut self, rank: Rank) {
        self.armed = Some(rank);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Whether a click on `card` continues the armed run without refreshing
    /// the snapshot.
    #[must_use]
    pub fn continues(&self, card: &Card, snapshot: &MatchSnapshot) -> bool {
        self.armed == Some(card.rank()) && snapshot.contains(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Face, Suit};
    use crate::core::{CardId, Side};
    use crate::rules::matches::{MatchInfo, MatchSet};

    fn card(id: u32, rank: u8) -> Card {
        Card::new(CardId(id), Face::new(Suit::Diamonds, Rank::new(rank)))
    }

    fn snapshot_with(cards: &[Card]) -> MatchSnapshot {
        let mut snapshot = MatchSnapshot::new();
        let set: MatchSet = cards.iter().map(MatchInfo::of).collect();
        snapshot.set_tracked(Side::Human, set);
        snapshot
    }

    #[test]
    fn test_arm_and_disarm() {
        let mut cursor = PlacementCursor::unarmed();
        assert!(!cursor.is_armed());

        cursor.arm(Rank::new(4));
        assert_eq!(cursor.rank(), Some(Rank::new(4)));

        cursor.disarm();
        assert_eq!(cursor, PlacementCursor::default());
    }

    #[test]
    fn test_continues() {
        let five = card(1, 5);
        let snapshot = snapshot_with(&[five, card(2, 5)]);

        assert!(PlacementCursor::armed(Rank::new(5)).continues(&five, &snapshot));
        // Unarmed cursor never continues
        assert!(!PlacementCursor::unarmed().continues(&five, &snapshot));
        // Different armed rank
        assert!(!PlacementCursor::armed(Rank::new(6)).continues(&five, &snapshot));
        // Card not in the snapshot
        assert!(!PlacementCursor::armed(Rank::new(5)).continues(&card(3, 5), &snapshot));
    }
}
