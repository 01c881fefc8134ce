//! Deck generation and the opening deal.
//!
//! The dealer draws from a "remaining multiset" of faces, hands cards out
//! alternately so both hands end up the same size, then lifts the first K
//! cards dealt to each side into singleton piles.
//!
//! ## Usage
//!
//! ```
//! use pile_match::cards::Dealer;
//! use pile_match::core::{GameRng, Side};
//!
//! let mut rng = GameRng::new(42);
//! let state = Dealer::new().decks(1).side_piles(4).deal(&mut rng);
//!
//! assert_eq!(state.piles(Side::Human).len(), 4);
//! assert_eq!(state.hand_size(Side::Human), 22);
//! assert_eq!(state.total_cards(), 52);
//! ```

use tracing::debug;

use super::card::{Card, Face};
use crate::core::config::{DrawDistribution, GameConfig};
use crate::core::{GameRng, GameState, IdAllocator, SideState};
use crate::zones::{Hand, Pile, ZonePosition};

/// Faces still undealt, with how many copies of each remain.
///
/// Keys whose count reaches zero are removed, so a uniform pick over the
/// entries is a uniform pick over the faces still available.
#[derive(Clone, Debug)]
pub struct RemainingDeck {
    entries: Vec<(Face, u32)>,
}

impl RemainingDeck {
    /// `copies` of every standard face.
    #[must_use]
    pub fn new(copies: u32) -> Self {
        let entries = if copies == 0 {
            Vec::new()
        } else {
            Face::standard_deck().map(|face| (face, copies)).collect()
        };
        Self { entries }
    }

    /// Distinct faces still available.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Cards still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.iter().map(|&(_, n)| n as usize).sum()
    }

    /// Draw one face, uniformly over the distinct faces left.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Face> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.gen_range_usize(0..self.entries.len());
        let (face, count) = &mut self.entries[index];
        let face = *face;
        *count -= 1;
        if *count == 0 {
            self.entries.swap_remove(index);
        }
        Some(face)
    }

    /// Every remaining physical card, in a fair random order.
    pub fn shuffled(self, rng: &mut GameRng) -> Vec<Face> {
        let mut faces: Vec<Face> = self
            .entries
            .into_iter()
            .flat_map(|(face, n)| std::iter::repeat(face).take(n as usize))
            .collect();
        rng.shuffle(&mut faces);
        faces
    }
}

/// Builder for the opening deal.
#[derive(Clone, Debug)]
pub struct Dealer {
    decks: u32,
    side_piles: usize,
    distribution: DrawDistribution,
}

impl Default for Dealer {
    fn default() -> Self {
        Self {
            decks: 1,
            side_piles: 4,
            distribution: DrawDistribution::PerFace,
        }
    }
}

impl Dealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dealer matching a game configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            decks: config.deck_multiplier,
            side_piles: config.side_pile_count,
            distribution: config.draw_distribution,
        }
    }

    pub fn decks(mut self, count: u32) -> Self {
        assert!(count >= 1, "Must deal at least 1 deck");
        self.decks = count;
        self
    }

    pub fn side_piles(mut self, count: usize) -> Self {
        assert!(count >= 1, "Must deal at least 1 pile per side");
        self.side_piles = count;
        self
    }

    pub fn distribution(mut self, distribution: DrawDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Deal a fresh game.
    ///
    /// Panics if the piles would swallow a whole hand; `GameConfig::validate`
    /// rejects such settings before they get here.
    pub fn deal(&self, rng: &mut GameRng) -> GameState {
        let per_side = 26 * self.decks as usize;
        assert!(
            self.side_piles < per_side,
            "{} piles leave no cards in a hand of {}",
            self.side_piles,
            per_side
        );

        let faces = self.draw_faces(rng);
        let mut ids = IdAllocator::new();
        let mut hands = [Hand::new(), Hand::new()];

        // Alternate human, automated so the hands stay level
        for (i, face) in faces.into_iter().enumerate() {
            let card = Card::new(ids.alloc(), face);
            hands[i % 2].push(card, ZonePosition::Top);
        }

        let [human, automated] = hands.map(|mut hand| {
            let piles: Vec<Pile> = hand
                .take_bottom(self.side_piles)
                .into_iter()
                .map(Pile::singleton)
                .collect();
            SideState::new(hand, piles)
        });

        debug!(
            decks = self.decks,
            side_piles = self.side_piles,
            distribution = ?self.distribution,
            "dealt new game"
        );

        GameState::new(human, automated, ids)
    }

    fn draw_faces(&self, rng: &mut GameRng) -> Vec<Face> {
        let mut remaining = RemainingDeck::new(self.decks);
        match self.distribution {
            DrawDistribution::PerFace => {
                let mut faces = Vec::with_capacity(remaining.remaining());
                while let Some(face) = remaining.draw(rng) {
                    faces.push(face);
                }
                faces
            }
            DrawDistribution::PerCard => remaining.shuffled(rng),
        }
    }
}
