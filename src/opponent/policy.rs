//! Target selection for the automated opponent.
//!
//! Policies are trait-based so tests and alternative opponents can swap the
//! choice rule without touching the controller:
//! - `UniformTargets`: uniform random pick (the default opponent)
//! - `FirstTarget`: always the first candidate, for deterministic play

use crate::core::{GameRng, GameState};
use crate::rules::MatchInfo;

/// Policy for choosing which matched pile top the automated side plays on.
pub trait TargetPolicy: Send + Sync {
    /// Choose one of `candidates`.
    ///
    /// Returns `None` only if `candidates` is empty.
    fn choose(
        &self,
        state: &GameState,
        candidates: &[MatchInfo],
        rng: &mut GameRng,
    ) -> Option<MatchInfo>;
}

/// Uniform random target policy.
#[derive(Clone, Debug, Default)]
pub struct UniformTargets;

impl TargetPolicy for UniformTargets {
    fn choose(
        &self,
        _state: &GameState,
        candidates: &[MatchInfo],
        rng: &mut GameRng,
    ) -> Option<MatchInfo> {
        rng.choose(candidates).copied()
    }
}

/// Always picks the first candidate.
#[derive(Clone, Debug, Default)]
pub struct FirstTarget;

impl TargetPolicy for FirstTarget {
    fn choose(
        &self,
        _state: &GameState,
        candidates: &[MatchInfo],
        _rng: &mut GameRng,
    ) -> Option<MatchInfo> {
        candidates.first().copied()
    }
}
