//! Physical cards: rank, suit, identity and provenance.
//!
//! A `Card` is a specific dealt card. Two cards of the same face (same rank
//! and suit) can coexist when several decks are mixed; they are told apart by
//! their `CardId`.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Side};

/// Card rank, 1 (ace) through 13 (king).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 13;

    /// Create a rank.
    ///
    /// Panics if `value` is outside 1..=13.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value >= Self::MIN && value <= Self::MAX, "Rank must be 1-13");
        Self(value)
    }

    /// Create a rank, or `None` if `value` is out of range.
    #[must_use]
    pub const fn try_new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All thirteen ranks in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{}", n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        };
        write!(f, "{}", symbol)
    }
}

/// A (suit, rank) combination. A standard deck holds each face once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Face {
    pub suit: Suit,
    pub rank: Rank,
}

impl Face {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The 52 faces of a standard deck, suit-major.
    pub fn standard_deck() -> impl Iterator<Item = Face> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::all().map(move |rank| Face::new(suit, rank)))
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Who most recently placed a card on a pile.
///
/// Only drives a short visual highlight; legality never looks at it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    #[default]
    None,
    Human,
    Automated,
}

impl From<Side> for Provenance {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Provenance::Human,
            Side::Automated => Provenance::Automated,
        }
    }
}

/// A dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    #[serde(default)]
    pub placed_by: Provenance,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, face: Face) -> Self {
        Self {
            id,
            face,
            placed_by: Provenance::None,
        }
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.face.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.face.suit
    }

    /// Copy of this card tagged with `provenance`.
    #[must_use]
    pub fn tagged(mut self, provenance: Provenance) -> Self {
        self.placed_by = provenance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bounds() {
        assert_eq!(Rank::try_new(0), None);
        assert_eq!(Rank::try_new(14), None);
        assert_eq!(Rank::try_new(13).map(Rank::value), Some(13));
        assert_eq!(Rank::all().count(), 13);
    }

    #[test]
    #[should_panic(expected = "Rank must be 1-13")]
    fn test_rank_new_panics_out_of_range() {
        let _ = Rank::new(0);
    }

    #[test]
    fn test_face_display() {
        assert_eq!(Face::new(Suit::Hearts, Rank::new(1)).to_string(), "A♥");
        assert_eq!(Face::new(Suit::Spades, Rank::new(10)).to_string(), "10♠");
        assert_eq!(Face::new(Suit::Clubs, Rank::new(12)).to_string(), "Q♣");
    }

    #[test]
    fn test_standard_deck_faces_are_unique() {
        let faces: Vec<_> = Face::standard_deck().collect();
        assert_eq!(faces.len(), 52);

        let mut sorted = faces.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 52);
    }

    #[test]
    fn test_card_tagging() {
        let card = Card::new(CardId(4), Face::new(Suit::Diamonds, Rank::new(7)));
        assert_eq!(card.placed_by, Provenance::None);

        let tagged = card.tagged(Side::Automated.into());
        assert_eq!(tagged.placed_by, Provenance::Automated);
        assert_eq!(tagged.id, card.id);
        assert_eq!(tagged.rank(), Rank::new(7));
    }

    #[test]
    fn test_card_serialization_defaults_provenance() {
        let card = Card::new(CardId(1), Face::new(Suit::Clubs, Rank::new(2)));
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
