//! Cards and the opening deal.
//!
//! ## Key Types
//!
//! - `Card`: a dealt card with id, face and provenance tag
//! - `Face`, `Rank`, `Suit`: what is printed on a card
//! - `Dealer`: builds the opening `GameState`

pub mod card;
pub mod deck;

pub use card::{Card, Face, Provenance, Rank, Suit};
pub use deck::{Dealer, RemainingDeck};
