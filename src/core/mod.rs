//! Core engine types: card ids, sides, state, actions, RNG, configuration.

pub mod entity;
pub mod side;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{CardId, IdAllocator};
pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{DrawDistribution, GameConfig};
pub use action::{Action, ActionRecord, PileLocator};
pub use state::{GameState, SideState};
