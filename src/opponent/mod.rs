//! The automated opponent.
//!
//! ## Overview
//!
//! The opponent never runs on its own thread. The session's scheduler fires
//! a cycle every `cadence + second_move_delay`; each cycle:
//!
//! 1. Gathers candidates: fresh matches plus tracked matches still visible
//! 2. Picks one through a [`TargetPolicy`] and places a card on it
//! 3. Returns a [`ChainPlan`] that the session runs after the second-move
//!    delay, falling through covered targets until one accepts
//!
//! ```
//! use pile_match::cards::Dealer;
//! use pile_match::core::{GameRng, Side};
//! use pile_match::opponent::{AutomatedController, CycleOutcome};
//! use pile_match::rules::{MatchEngine, MatchSnapshot};
//!
//! let mut rng = GameRng::new(7);
//! let state = Dealer::new().deal(&mut rng);
//! let mut controller = AutomatedController::new(MatchEngine::new(4), rng.fork());
//!
//! let result = controller.cycle(&state, &MatchSnapshot::new());
//! match result.outcome {
//!     CycleOutcome::Placed { .. } => assert_eq!(result.state.hand_size(Side::Automated), 21),
//!     _ => assert_eq!(result.state, state),
//! }
//! ```

pub mod controller;
pub mod policy;

pub use controller::{AutomatedController, ChainOutcome, ChainPlan, CycleOutcome, CycleResult};
pub use policy::{FirstTarget, TargetPolicy, UniformTargets};
