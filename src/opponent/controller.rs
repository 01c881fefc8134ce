//! The automated opponent's move cycle.
//!
//! A cycle makes one placement on a randomly chosen match, then hands back
//! a [`ChainPlan`]: the other pile tops that showed the same rank when the
//! pick was made. The session runs the plan after the second-move delay,
//! against whatever the table looks like by then.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::policy::{TargetPolicy, UniformTargets};
use crate::cards::Rank;
use crate::core::{Action, CardId, GameRng, GameState, PileLocator, Side};
use crate::error::Rejection;
use crate::rules::{find_matches, MatchEngine, MatchSet, MatchSnapshot, Placement};

/// Follow-up targets for the second move of a cycle, in the order they
/// are tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainPlan {
    pub rank: Rank,
    pub targets: SmallVec<[(PileLocator, CardId); 8]>,
}

impl ChainPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// What a cycle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The game is over; the loop should not be re-armed.
    GameOver,
    /// No candidate matches on the table.
    Idle,
    /// One card placed. `chain` is `None` when the placement won the game.
    Placed {
        placement: Placement,
        chain: Option<ChainPlan>,
    },
}

/// What a chain walk did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainOutcome {
    /// The game was already over when the chain fired.
    GameOver,
    Placed(Placement),
    /// Every target had been covered.
    Exhausted,
}

/// Result of a cycle: the state and snapshot to keep, and the outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleResult {
    pub state: GameState,
    pub snapshot: MatchSnapshot,
    pub outcome: CycleOutcome,
}

/// Drives the automated side.
#[derive(Clone, Debug)]
pub struct AutomatedController<P: TargetPolicy = UniformTargets> {
    engine: MatchEngine,
    policy: P,
    rng: GameRng,
}

impl AutomatedController<UniformTargets> {
    /// Controller with the uniform random policy.
    #[must_use]
    pub fn new(engine: MatchEngine, rng: GameRng) -> Self {
        Self::with_policy(engine, UniformTargets, rng)
    }
}

impl<P: TargetPolicy> AutomatedController<P> {
    #[must_use]
    pub fn with_policy(engine: MatchEngine, policy: P, rng: GameRng) -> Self {
        Self { engine, policy, rng }
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Candidate targets: fresh matches plus every tracked match (either
    /// side) whose card is still a visible top.
    #[must_use]
    pub fn candidates(&self, state: &GameState, snapshot: &MatchSnapshot) -> MatchSet {
        find_matches(state).union(&snapshot.all().still_present(state))
    }

    /// Run one cycle.
    pub fn cycle(&mut self, state: &GameState, snapshot: &MatchSnapshot) -> CycleResult {
        if state.is_over() {
            return CycleResult {
                state: state.clone(),
                snapshot: snapshot.clone(),
                outcome: CycleOutcome::GameOver,
            };
        }

        let candidates = self.candidates(state, snapshot);
        let mut snapshot = snapshot.clone();
        snapshot.set_tracked(Side::Automated, candidates.clone());

        let Some(first) = self.policy.choose(state, candidates.as_slice(), &mut self.rng) else {
            debug!("automated cycle found no matches");
            return CycleResult {
                state: state.clone(),
                snapshot,
                outcome: CycleOutcome::Idle,
            };
        };

        let Some(target) = state.locate_top(first.id) else {
            // Candidates are filtered to visible tops, so this only happens
            // with a policy that invents ids.
            debug!(card = %first.id, "chosen target is not on the table");
            return CycleResult {
                state: state.clone(),
                snapshot,
                outcome: CycleOutcome::Idle,
            };
        };

        let targets = state
            .tops()
            .filter(|(_, card)| card.rank() == first.rank && card.id != first.id)
            .map(|(locator, card)| (locator, card.id))
            .collect();

        let transition = match self.engine.attempt_listed(
            state,
            &candidates,
            Side::Automated,
            target,
            first.id,
        ) {
            Ok(transition) => transition,
            Err(rejection) => {
                debug!(%rejection, "automated pick rejected");
                return CycleResult {
                    state: state.clone(),
                    snapshot,
                    outcome: CycleOutcome::Idle,
                };
            }
        };

        let Some(placement) = transition.placement else {
            return CycleResult {
                state: transition.state,
                snapshot,
                outcome: CycleOutcome::Idle,
            };
        };

        let chain = if transition.state.is_over() {
            None
        } else {
            Some(ChainPlan {
                rank: first.rank,
                targets,
            })
        };

        debug!(
            target = %placement.target,
            rank = %first.rank,
            chain = chain.as_ref().map_or(0, |c| c.targets.len()),
            "automated cycle placed"
        );

        CycleResult {
            state: transition.state,
            snapshot,
            outcome: CycleOutcome::Placed { placement, chain },
        }
    }

    /// Walk a chain plan against the current state.
    ///
    /// Targets that are no longer the top of their pile are skipped. The
    /// first successful placement ends the walk.
    pub fn run_chain(&self, state: &GameState, plan: &ChainPlan) -> (GameState, ChainOutcome) {
        if state.is_over() {
            return (state.clone(), ChainOutcome::GameOver);
        }

        for &(target, card) in &plan.targets {
            match self.engine.apply(state, &Action::place(Side::Automated, target, card)) {
                Ok(transition) => {
                    if let Some(placement) = transition.placement {
                        return (transition.state, ChainOutcome::Placed(placement));
                    }
                }
                Err(Rejection::GameOver) => return (state.clone(), ChainOutcome::GameOver),
                Err(rejection) => {
                    trace!(%target, %rejection, "skipping covered chain target");
                }
            }
        }

        (state.clone(), ChainOutcome::Exhausted)
    }
}
