//! The per-side hand stack.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Where cards enter a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// The end cards are drawn from.
    Top,
    /// The far end; only a redeal puts cards here.
    Bottom,
}

/// A stack of undealt cards. Index 0 is the bottom, the last card is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card the next placement will use.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Remove and return the top card.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Add one card at `position`.
    pub fn push(&mut self, card: Card, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.cards.push_back(card),
            ZonePosition::Bottom => self.cards.push_front(card),
        }
    }

    /// Add a run of cards at `position`, keeping their relative order.
    ///
    /// With `Bottom`, the first card of `cards` ends up as the new bottom.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>, position: ZonePosition) {
        let incoming: Vector<Card> = cards.into_iter().collect();
        match position {
            ZonePosition::Top => self.cards.append(incoming),
            ZonePosition::Bottom => {
                let mut merged = incoming;
                merged.append(std::mem::take(&mut self.cards));
                self.cards = merged;
            }
        }
    }

    /// Remove up to `count` cards from the top, returned bottom-to-top.
    pub fn take_top(&mut self, count: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(count);
        let taken = self.cards.split_off(keep);
        taken.into_iter().collect()
    }

    /// Remove up to `count` cards from the bottom, returned bottom-to-top.
    pub fn take_bottom(&mut self, count: usize) -> Vec<Card> {
        let split = count.min(self.cards.len());
        let rest = self.cards.split_off(split);
        let taken = std::mem::replace(&mut self.cards, rest);
        taken.into_iter().collect()
    }

    /// Cards bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl FromIterator<Card> for Hand {
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
    use crate::core::CardId;

    fn card(id: u32) -> Card {
        Card::new(CardId(id), Face::new(Suit::Spades, Rank::new(1 + (id % 13) as u8)))
    }

    fn ids(hand: &Hand) -> Vec<u32> {
        hand.iter().map(|c| c.id.raw()).collect()
    }

    #[test]
    fn test_stack_order() {
        let mut hand = Hand::new();
        hand.push(card(1), ZonePosition::Top);
        hand.push(card(2), ZonePosition::Top);
        hand.push(card(3), ZonePosition::Bottom);

        assert_eq!(ids(&hand), vec![3, 1, 2]);
        assert_eq!(hand.top().map(|c| c.id), Some(CardId(2)));

        assert_eq!(hand.pop_top().map(|c| c.id), Some(CardId(2)));
        assert_eq!(hand.pop_top().map(|c| c.id), Some(CardId(1)));
        assert_eq!(hand.pop_top().map(|c| c.id), Some(CardId(3)));
        assert_eq!(hand.pop_top(), None);
    }

    #[test]
    fn test_extend_bottom_keeps_order() {
        let mut hand: Hand = [card(1), card(2)].into_iter().collect();
        hand.extend([card(10), card(11)], ZonePosition::Bottom);

        assert_eq!(ids(&hand), vec![10, 11, 1, 2]);

        hand.extend([card(20)], ZonePosition::Top);
        assert_eq!(ids(&hand), vec![10, 11, 1, 2, 20]);
    }

    #[test]
    fn test_take_top_and_bottom() {
        let mut hand: Hand = (1..=6).map(card).collect();

        let top: Vec<u32> = hand.take_top(2).iter().map(|c| c.id.raw()).collect();
        assert_eq!(top, vec![5, 6]);

        let bottom: Vec<u32> = hand.take_bottom(2).iter().map(|c| c.id.raw()).collect();
        assert_eq!(bottom, vec![1, 2]);

        assert_eq!(ids(&hand), vec![3, 4]);
    }

    #[test]
    fn test_take_more_than_available() {
        let mut hand: Hand = (1..=2).map(card).collect();
        assert_eq!(hand.take_top(5).len(), 2);
        assert!(hand.is_empty());
    }
}
