//! The game session: one table, its timers and what the UI reads.
//!
//! `GameSession` owns the current state value, the match snapshot and
//! cursor, the automated controller and the scheduler. The host forwards
//! clicks and clock ticks; every accepted change replaces the state value
//! and bumps `revision`.

use std::time::Duration;

use im::Vector;
use tracing::{debug, info, warn};

use super::notices::Notices;
use super::scheduler::{Scheduler, Task};
use crate::cards::Dealer;
use crate::core::rng::{DEAL_CONTEXT, OPPONENT_CONTEXT};
use crate::core::{CardId, GameConfig, GameRng, GameState, PileLocator, Side};
use crate::error::{ConfigError, RedealRejected, Rejection, ResumeError};
use crate::opponent::{AutomatedController, ChainOutcome, CycleOutcome, TargetPolicy, UniformTargets};
use crate::rules::{MatchEngine, MatchSet, MatchSnapshot, Placement, PlacementCursor};
use crate::zones::Pile;

/// Result of a human click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub result: Result<Placement, Rejection>,
    pub won_by: Option<Side>,
}

impl ClickOutcome {
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// What happened during one `tick`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tasks of the current generation that fired.
    pub fired: usize,
    /// Automated placements, in order.
    pub placements: Vec<Placement>,
    pub won_by: Option<Side>,
}

/// A running game against the automated opponent.
#[derive(Clone, Debug)]
pub struct GameSession<P: TargetPolicy + Clone = UniformTargets> {
    config: GameConfig,
    engine: MatchEngine,
    /// Session stream; each game forks its own.
    rng: GameRng,
    policy: P,
    state: GameState,
    snapshot: MatchSnapshot,
    cursor: PlacementCursor,
    controller: AutomatedController<P>,
    scheduler: Scheduler,
    notices: Notices,
    revision: u64,
}

impl GameSession<UniformTargets> {
    /// Deal a first game with the uniform random opponent.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_policy(config, UniformTargets)
    }

    /// Continue from an existing table, e.g. a saved game.
    pub fn resume(config: GameConfig, state: GameState) -> Result<Self, ResumeError> {
        Self::resume_with_policy(config, UniformTargets, state)
    }
}

impl<P: TargetPolicy + Clone> GameSession<P> {
    pub fn with_policy(config: GameConfig, policy: P) -> Result<Self, ConfigError> {
        let mut session = Self::empty(config, policy)?;
        session.deal_new_game();
        Ok(session)
    }

    /// Continue from `state` with a chosen opponent policy.
    ///
    /// A game still in progress must have cards in both hands.
    pub fn resume_with_policy(config: GameConfig, policy: P, state: GameState) -> Result<Self, ResumeError> {
        if !state.is_over() {
            if let Some(side) = Side::ALL.into_iter().find(|&side| state.hand(side).is_empty()) {
                return Err(ResumeError::EmptyHand(side));
            }
        }
        let mut session = Self::empty(config, policy)?;
        let game_rng = session.rng.fork();
        info!(winner = ?state.won_by(), moves = state.history().len(), "resumed game");
        session.install(state, &game_rng);
        Ok(session)
    }

    fn empty(config: GameConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = MatchEngine::new(config.side_pile_count);
        let rng = GameRng::new(config.seed);
        let controller = AutomatedController::with_policy(
            engine,
            policy.clone(),
            rng.for_context(OPPONENT_CONTEXT),
        );
        Ok(Self {
            config,
            engine,
            rng,
            policy,
            state: GameState::from_sides(Default::default(), Default::default()),
            snapshot: MatchSnapshot::new(),
            cursor: PlacementCursor::unarmed(),
            controller,
            scheduler: Scheduler::new(),
            notices: Notices::new(),
            revision: 0,
        })
    }

    // === Lifecycle ===

    /// Change the deck count and pile count and deal a new game.
    pub fn start_game(&mut self, deck_multiplier: u32, side_pile_count: usize) -> Result<(), ConfigError> {
        let config = self
            .config
            .clone()
            .with_decks(deck_multiplier)
            .with_side_piles(side_pile_count);
        config.validate()?;
        self.config = config;
        self.restart();
        Ok(())
    }

    /// Abandon the current game and deal a new one with the same settings.
    ///
    /// Every pending timer of the old game is cancelled.
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        info!(generation = self.scheduler.generation(), "restarting game");
        self.deal_new_game();
    }

    fn deal_new_game(&mut self) {
        let game_rng = self.rng.fork();
        let state = Dealer::from_config(&self.config).deal(&mut game_rng.for_context(DEAL_CONTEXT));
        info!(
            seed = game_rng.seed(),
            decks = self.config.deck_multiplier,
            side_piles = self.config.side_pile_count,
            "started game"
        );
        self.install(state, &game_rng);
    }

    fn install(&mut self, state: GameState, game_rng: &GameRng) {
        self.engine = MatchEngine::new(self.config.side_pile_count);
        self.controller = AutomatedController::with_policy(
            self.engine,
            self.policy.clone(),
            game_rng.for_context(OPPONENT_CONTEXT),
        );
        self.snapshot = MatchSnapshot::fresh(&state);
        self.state = state;
        self.cursor = PlacementCursor::unarmed();
        self.notices.clear();
        self.revision += 1;

        if !self.state.is_over() {
            self.schedule_cycle();
        }
    }

    // === Settings ===

    /// Change the automated timing. An already scheduled cycle keeps its
    /// due time; the new period applies from the next one.
    pub fn update_timing(&mut self, cadence: Duration, second_move_delay: Duration) -> Result<(), ConfigError> {
        let config = self
            .config
            .clone()
            .with_cadence(cadence)
            .with_second_move_delay(second_move_delay);
        config.validate()?;
        debug!(?cadence, ?second_move_delay, "updated automated timing");
        self.config = config;
        Ok(())
    }

    /// Replace the whole configuration.
    ///
    /// A different deck count, pile count or draw distribution deals a new
    /// game. A different seed takes effect from the next deal.
    pub fn apply_settings(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let new_game = self.config.requires_new_game(&config);
        if config.seed != self.config.seed {
            self.rng = GameRng::new(config.seed);
        }
        self.config = config;
        if new_game {
            self.restart();
        }
        Ok(())
    }

    // === Input ===

    /// Handle a human click on the pile top `card` at `target`.
    pub fn handle_human_target(&mut self, target: PileLocator, card: CardId) -> ClickOutcome {
        let outcome = self.engine.attempt_move(
            &self.state,
            &self.snapshot,
            self.cursor,
            Side::Human,
            target,
            card,
        );

        let changed =
            outcome.accepted() || outcome.snapshot != self.snapshot || outcome.cursor != self.cursor;
        self.state = outcome.state;
        self.snapshot = outcome.snapshot;
        self.cursor = outcome.cursor;
        if changed {
            self.revision += 1;
        }

        if let Ok(placement) = outcome.result {
            self.schedule_reset(placement);
        }

        ClickOutcome {
            result: outcome.result,
            won_by: self.state.won_by(),
        }
    }

    /// Redeal if the table is deadlocked.
    ///
    /// A refusal while matches remain shows a notice instead.
    pub fn try_redeal(&mut self) -> bool {
        match self.engine.try_redeal(&self.state, &self.snapshot) {
            Ok(state) => {
                self.state = state;
                self.snapshot.clear();
                self.cursor.disarm();
                self.revision += 1;
                true
            }
            Err(rejection @ RedealRejected::MatchesRemain) => {
                warn!(%rejection, "redeal refused");
                let id = self.notices.push(rejection.to_string());
                self.scheduler.schedule(self.config.notice_duration, Task::DismissNotice(id));
                self.revision += 1;
                false
            }
            Err(rejection) => {
                warn!(%rejection, "redeal refused");
                false
            }
        }
    }

    /// Advance the clock by `elapsed`, firing every task that comes due.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut report = TickReport::default();

        while let Some(task) = self.scheduler.pop_due(until) {
            report.fired += 1;
            self.run_task(task, &mut report);
        }
        self.scheduler.advance_to(until);

        report.won_by = self.state.won_by();
        report
    }

    fn run_task(&mut self, task: Task, report: &mut TickReport) {
        match task {
            Task::AutomatedCycle => self.run_cycle(report),
            Task::AutomatedChain(plan) => {
                let (state, outcome) = self.controller.run_chain(&self.state, &plan);
                match outcome {
                    ChainOutcome::Placed(placement) => {
                        self.state = state;
                        self.revision += 1;
                        self.schedule_reset(placement);
                        report.placements.push(placement);
                    }
                    ChainOutcome::Exhausted => debug!(rank = %plan.rank, "automated chain found no target"),
                    ChainOutcome::GameOver => {}
                }
            }
            Task::ResetProvenance { card, sequence } => {
                if let Some(state) = self.engine.reset_provenance(&self.state, card, sequence) {
                    self.state = state;
                    self.revision += 1;
                }
            }
            Task::DismissNotice(id) => {
                if self.notices.dismiss(id) {
                    self.revision += 1;
                    self.scheduler.schedule(self.config.notice_fade, Task::RemoveNotice(id));
                }
            }
            Task::RemoveNotice(id) => {
                if self.notices.remove(id) {
                    self.revision += 1;
                }
            }
        }
    }

    fn run_cycle(&mut self, report: &mut TickReport) {
        let result = self.controller.cycle(&self.state, &self.snapshot);
        match result.outcome {
            CycleOutcome::GameOver => {
                debug!("automated loop stopped");
                return;
            }
            CycleOutcome::Idle => {
                if result.snapshot != self.snapshot {
                    self.snapshot = result.snapshot;
                    self.revision += 1;
                }
            }
            CycleOutcome::Placed { placement, chain } => {
                self.state = result.state;
                self.snapshot = result.snapshot;
                self.revision += 1;
                self.schedule_reset(placement);
                report.placements.push(placement);

                if let Some(plan) = chain.filter(|plan| !plan.is_empty()) {
                    self.scheduler.schedule(
                        self.config.automated_second_move_delay,
                        Task::AutomatedChain(plan),
                    );
                }
            }
        }

        if !self.state.is_over() {
            self.schedule_cycle();
        }
    }

    fn schedule_cycle(&mut self) {
        self.scheduler
            .schedule(self.config.automated_period(), Task::AutomatedCycle);
    }

    fn schedule_reset(&mut self, placement: Placement) {
        self.scheduler.schedule(
            self.config.provenance_reset_delay,
            Task::ResetProvenance {
                card: placement.card,
                sequence: placement.sequence,
            },
        );
    }

    // === Projections ===

    #[must_use]
    pub fn hand_size(&self, side: Side) -> usize {
        self.state.hand_size(side)
    }

    #[must_use]
    pub fn piles(&self, side: Side) -> &Vector<Pile> {
        self.state.piles(side)
    }

    #[must_use]
    pub fn won_by(&self) -> Option<Side> {
        self.state.won_by()
    }

    /// Union of both sides' tracked matches.
    #[must_use]
    pub fn matches(&self) -> MatchSet {
        self.snapshot.all()
    }

    #[must_use]
    pub fn snapshot(&self) -> &MatchSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn cursor(&self) -> PlacementCursor {
        self.cursor
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Bumped on every observable change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Virtual time since the session was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
