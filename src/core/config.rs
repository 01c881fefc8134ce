//! Game configuration.
//!
//! The human-tunable settings (deck count, pile count, opponent timing) plus
//! the fixed presentation timings the core schedules against. The settings
//! form and its key-value persistence live outside this crate; they hand a
//! `GameConfig` in and may round-trip it through serde.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_DECKS: u32 = 1;
pub const MAX_DECKS: u32 = 8;
pub const MIN_SIDE_PILES: usize = 1;
pub const MAX_SIDE_PILES: usize = 8;

/// Longest automated cadence or second-move delay the settings accept.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(8);

/// Longest provenance reset or notice timing accepted.
pub const MAX_PRESENTATION_DELAY: Duration = Duration::from_secs(60);

/// How the deck generator draws cards from the remaining multiset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawDistribution {
    /// Uniform over the distinct (suit, rank) faces still available.
    ///
    /// Faces with several copies left are no likelier than faces with one.
    #[default]
    PerFace,
    /// Uniform over physical cards: a fair shuffle of the whole multiset.
    PerCard,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of 52-card decks mixed together.
    pub deck_multiplier: u32,

    /// Singleton piles dealt to each side.
    pub side_pile_count: usize,

    /// Pause between automated cycles.
    pub automated_cadence: Duration,

    /// Pause between the automated first move and its chained follow-up.
    pub automated_second_move_delay: Duration,

    /// How long a placed card keeps its provenance tag.
    pub provenance_reset_delay: Duration,

    /// How long a warning notice stays active.
    pub notice_duration: Duration,

    /// How long an inactive notice lingers before removal.
    pub notice_fade: Duration,

    pub draw_distribution: DrawDistribution,

    /// Seed for dealing and opponent choices.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_multiplier: 1,
            side_pile_count: 4,
            automated_cadence: Duration::from_secs(4),
            automated_second_move_delay: Duration::from_millis(500),
            provenance_reset_delay: Duration::from_millis(500),
            notice_duration: Duration::from_secs(1),
            notice_fade: Duration::from_secs(2),
            draw_distribution: DrawDistribution::PerFace,
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_decks(mut self, deck_multiplier: u32) -> Self {
        self.deck_multiplier = deck_multiplier;
        self
    }

    #[must_use]
    pub fn with_side_piles(mut self, count: usize) -> Self {
        self.side_pile_count = count;
        self
    }

    #[must_use]
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.automated_cadence = cadence;
        self
    }

    #[must_use]
    pub fn with_second_move_delay(mut self, delay: Duration) -> Self {
        self.automated_second_move_delay = delay;
        self
    }

    #[must_use]
    pub fn with_provenance_reset_delay(mut self, delay: Duration) -> Self {
        self.provenance_reset_delay = delay;
        self
    }

    #[must_use]
    pub fn with_notice_timing(mut self, duration: Duration, fade: Duration) -> Self {
        self.notice_duration = duration;
        self.notice_fade = fade;
        self
    }

    #[must_use]
    pub fn with_draw_distribution(mut self, distribution: DrawDistribution) -> Self {
        self.draw_distribution = distribution;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cards each side holds at the deal.
    #[must_use]
    pub fn cards_per_side(&self) -> usize {
        26 * self.deck_multiplier as usize
    }

    /// Full period of the automated loop: cadence plus the chain delay.
    #[must_use]
    pub fn automated_period(&self) -> Duration {
        self.automated_cadence
            .saturating_add(self.automated_second_move_delay)
    }

    /// Check every setting against its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&self.deck_multiplier) {
            return Err(ConfigError::DeckMultiplier {
                value: self.deck_multiplier,
                min: MIN_DECKS,
                max: MAX_DECKS,
            });
        }
        if !(MIN_SIDE_PILES..=MAX_SIDE_PILES).contains(&self.side_pile_count) {
            return Err(ConfigError::SidePileCount {
                value: self.side_pile_count,
                min: MIN_SIDE_PILES,
                max: MAX_SIDE_PILES,
            });
        }
        if self.side_pile_count >= self.cards_per_side() {
            return Err(ConfigError::PilesExceedHand {
                piles: self.side_pile_count,
                per_side: self.cards_per_side(),
            });
        }
        for (name, value, max) in [
            ("automated cadence", self.automated_cadence, MAX_TIMEOUT),
            ("second move delay", self.automated_second_move_delay, MAX_TIMEOUT),
            ("provenance reset delay", self.provenance_reset_delay, MAX_PRESENTATION_DELAY),
            ("notice duration", self.notice_duration, MAX_PRESENTATION_DELAY),
            ("notice fade", self.notice_fade, MAX_PRESENTATION_DELAY),
        ] {
            if value > max {
                return Err(ConfigError::Timeout { name, value, max });
            }
        }
        Ok(())
    }

    /// Clamp every setting into its bounds.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.deck_multiplier = self.deck_multiplier.clamp(MIN_DECKS, MAX_DECKS);
        self.side_pile_count = self.side_pile_count.clamp(MIN_SIDE_PILES, MAX_SIDE_PILES);
        self.automated_cadence = self.automated_cadence.min(MAX_TIMEOUT);
        self.automated_second_move_delay = self.automated_second_move_delay.min(MAX_TIMEOUT);
        self.provenance_reset_delay = self.provenance_reset_delay.min(MAX_PRESENTATION_DELAY);
        self.notice_duration = self.notice_duration.min(MAX_PRESENTATION_DELAY);
        self.notice_fade = self.notice_fade.min(MAX_PRESENTATION_DELAY);
        self
    }

    /// True when switching to `other` requires dealing a new game.
    #[must_use]
    pub fn requires_new_game(&self, other: &GameConfig) -> bool {
        self.deck_multiplier != other.deck_multiplier
            || self.side_pile_count != other.side_pile_count
            || self.draw_distribution != other.draw_distribution
    }
}
