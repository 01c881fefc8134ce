//! Face-up side piles.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Provenance};
use crate::core::CardId;

/// A face-up stack. Index 0 is the bottom, the last card is the visible top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// A pile holding a single card, as dealt.
    #[must_use]
    pub fn singleton(card: Card) -> Self {
        Self {
            cards: Vector::unit(card),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The visible card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Place a card on top.
    pub fn push_top(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Cards bottom-to-top, for draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Set the provenance of the card with `id`.
    ///
    /// Returns true if the card is in this pile and its tag changed.
    pub fn retag(&mut self, id: CardId, provenance: Provenance) -> bool {
        let Some(index) = self.cards.iter().position(|c| c.id == id) else {
            return false;
        };
        if self.cards[index].placed_by == provenance {
            return false;
        }
        let card = self.cards[index].tagged(provenance);
        self.cards.set(index, card);
        true
    }

    /// Take every card out, bottom-to-top.
    pub fn drain(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards).into_iter().collect()
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Face, Rank, Suit};

    fn card(id: u32, rank: u8) -> Card {
        Card::new(CardId(id), Face::new(Suit::Hearts, Rank::new(rank)))
    }

    #[test]
    fn test_singleton_and_push() {
        let mut pile = Pile::singleton(card(1, 5));
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.top().map(|c| c.id), Some(CardId(1)));

        pile.push_top(card(2, 9));
        assert_eq!(pile.len(), 2);
        assert_eq!(pile.top().map(|c| c.id), Some(CardId(2)));
    }

    #[test]
    fn test_retag() {
        let mut pile = Pile::singleton(card(1, 5));
        pile.push_top(card(2, 9).tagged(Provenance::Human));

        assert!(pile.retag(CardId(2), Provenance::None));
        assert!(!pile.retag(CardId(2), Provenance::None));
        assert!(!pile.retag(CardId(99), Provenance::None));
        assert_eq!(pile.top().map(|c| c.placed_by), Some(Provenance::None));
    }

    #[test]
    fn test_drain() {
        let mut pile: Pile = [card(1, 2), card(2, 3)].into_iter().collect();
        let drained: Vec<u32> = pile.drain().iter().map(|c| c.id.raw()).collect();

        assert_eq!(drained, vec![1, 2]);
        assert!(pile.is_empty());
        assert_eq!(pile.top(), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Pile::singleton(card(1, 5));
        let mut copy = original.clone();
        copy.push_top(card(2, 6));

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
