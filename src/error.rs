//! Typed outcomes for rejected operations and invalid settings.
//!
//! None of these are fatal: a rejected click or redeal is part of normal
//! play and leaves the game running.

use thiserror::Error;

use crate::core::{CardId, PileLocator, Side};

/// Why a placement was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("game is already won")]
    GameOver,
    #[error("pile {0} does not exist")]
    UnknownPile(PileLocator),
    #[error("{card} is no longer the top of pile {target}")]
    Stale { target: PileLocator, card: CardId },
    #[error("{0} is not a current match")]
    NotMatched(CardId),
}

/// Why a redeal was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RedealRejected {
    #[error("There are still matches")]
    MatchesRemain,
    #[error("game is already won")]
    GameOver,
}

/// Invalid game settings.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("deck multiplier must be between {min} and {max}, got {value}")]
    DeckMultiplier { value: u32, min: u32, max: u32 },
    #[error("side pile count must be between {min} and {max}, got {value}")]
    SidePileCount { value: usize, min: usize, max: usize },
    #[error("{piles} side piles leave no cards in a hand of {per_side}")]
    PilesExceedHand { piles: usize, per_side: usize },
    #[error("{name} of {value:?} exceeds the maximum of {max:?}")]
    Timeout {
        name: &'static str,
        value: std::time::Duration,
        max: std::time::Duration,
    },
}

/// Why a saved table could not be resumed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ResumeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} hand is empty but the game has no winner")]
    EmptyHand(Side),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let stale = Rejection::Stale {
            target: PileLocator::new(Side::Automated, 2),
            card: CardId(9),
        };
        assert_eq!(stale.to_string(), "Card(9) is no longer the top of pile automated#2");
        assert_eq!(Rejection::NotMatched(CardId(3)).to_string(), "Card(3) is not a current match");
    }

    #[test]
    fn test_redeal_message_is_user_facing() {
        assert_eq!(RedealRejected::MatchesRemain.to_string(), "There are still matches");
    }

    #[test]
    fn test_resume_error_wraps_config() {
        let config = ConfigError::PilesExceedHand { piles: 30, per_side: 26 };
        assert_eq!(ResumeError::from(config.clone()).to_string(), config.to_string());
        assert_eq!(
            ResumeError::EmptyHand(Side::Human).to_string(),
            "human hand is empty but the game has no winner"
        );
    }
}
