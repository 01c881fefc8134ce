//! Redeal: the escape hatch when no pile tops match.
//!
//! Every pile card goes back underneath its side's hand, then a fresh row
//! of singleton piles is dealt off the top. The operation is refused while
//! any match is still on the table, counting tracked matches that are still
//! visible even if a fresh scan would no longer list them.

use tracing::debug;

use super::matches::{find_matches, MatchSnapshot};
use crate::cards::Provenance;
use crate::core::{Action, GameState, Side};
use crate::error::RedealRejected;
use crate::zones::{Pile, ZonePosition};

/// Check whether a redeal is currently allowed.
pub fn check_redeal(state: &GameState, snapshot: &MatchSnapshot) -> Result<(), RedealRejected> {
    if state.is_over() {
        return Err(RedealRejected::GameOver);
    }
    if !find_matches(state).is_empty() || snapshot.any_still_present(state) {
        return Err(RedealRejected::MatchesRemain);
    }
    Ok(())
}

/// Recycle both sides' piles and deal `side_piles` fresh singleton piles
/// each, without checking for remaining matches.
///
/// A side always keeps at least one card in hand, so a side holding
/// `side_piles` cards or fewer gets fewer piles back.
#[must_use]
pub fn recycle(state: &GameState, side_piles: usize) -> GameState {
    let mut next = state.clone();

    for side in Side::ALL {
        let side_state = next.side_mut(side);

        let returned: Vec<_> = side_state
            .piles
            .iter_mut()
            .flat_map(Pile::drain)
            .map(|card| card.tagged(Provenance::None))
            .collect();
        side_state.hand.extend(returned, ZonePosition::Bottom);

        let count = side_piles.min(side_state.hand.len().saturating_sub(1));
        side_state.piles = side_state
            .hand
            .take_top(count)
            .into_iter()
            .map(Pile::singleton)
            .collect();

        debug!(%side, piles = count, hand = side_state.hand.len(), "redealt side");
    }

    next.record(Action::Redeal, None);
    next
}

/// Redeal if no matches remain.
pub fn try_redeal(
    state: &GameState,
    snapshot: &MatchSnapshot,
    side_piles: usize,
) -> Result<GameState, RedealRejected> {
    check_redeal(state, snapshot)?;
    Ok(recycle(state, side_piles))
}
