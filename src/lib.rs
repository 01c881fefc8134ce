//! # pile-match
//!
//! Engine for a two-sided card-matching game: a human against an automated
//! opponent on a timer.
//!
//! Each side holds a hand and a row of piles. A player places the top card of
//! their hand on any pile whose visible top shares its rank with another
//! visible top. Emptying your hand wins. When no tops match, either side can
//! redeal.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: Rules take a `GameState` and return a new one.
//!    State is built on `im` persistent collections, so keeping the old value
//!    around costs nothing.
//!
//! 2. **Cooperative timing**: No threads. The session owns a virtual-clock
//!    scheduler; the host calls `tick` and timers fire in order.
//!
//! 3. **Generation cancellation**: Restart bumps a generation and every timer
//!    from an older generation is dropped when it comes due.
//!
//! ## Modules
//!
//! - `core`: Card ids, sides, state, actions, RNG, configuration
//! - `zones`: Hands and piles
//! - `cards`: Faces, cards and the dealer
//! - `rules`: Match finder, cursor, move validation, redeal
//! - `opponent`: Automated opponent cycle and target policies
//! - `session`: `GameSession`, scheduler and notices
//! - `error`: Rejections and configuration errors

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod opponent;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardId, IdAllocator,
    Side, SideMap,
    GameRng,
    DrawDistribution, GameConfig,
    Action, ActionRecord, PileLocator,
    GameState, SideState,
};

pub use crate::zones::{Hand, Pile, ZonePosition};

pub use crate::cards::{Card, Dealer, Face, Provenance, Rank, RemainingDeck, Suit};

pub use crate::rules::{
    find_matches, MatchEngine, MatchInfo, MatchSet, MatchSnapshot,
    MoveOutcome, Placement, PlacementCursor, Transition,
};

pub use crate::opponent::{
    AutomatedController, ChainOutcome, ChainPlan, CycleOutcome,
    FirstTarget, TargetPolicy, UniformTargets,
};

pub use crate::session::{ClickOutcome, GameSession, Notice, NoticePhase, Notices, TickReport};

pub use crate::error::{ConfigError, RedealRejected, Rejection, ResumeError};
