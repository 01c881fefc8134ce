//! Move validation and application.
//!
//! `MatchEngine::apply` is the pure reducer: given a state and an action it
//! returns the next state (or why it refused) and never touches its input.
//! The validators on top of it decide whether a click or an automated pick
//! is a legal match before handing it to the reducer.
//!
//! ## Placement rules
//!
//! - The target pile's top must still be the card the actor saw.
//! - The target must be listed in the relevant match set by id and rank.
//! - The actor's hand is a stack: the placed card is always its top card.
//! - The placement that empties a hand wins; the state then stays frozen.

use tracing::{debug, info, trace};

use super::cursor::PlacementCursor;
use super::matches::{find_matches, MatchSet, MatchSnapshot};
use super::redeal;
use crate::cards::{Card, Provenance};
use crate::core::{Action, ActionRecord, CardId, GameState, PileLocator, Side};
use crate::error::{RedealRejected, Rejection};

/// A card that left a hand and landed on a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub actor: Side,
    pub target: PileLocator,
    /// The card that was placed (now the target's top).
    pub card: CardId,
    /// The card that was covered.
    pub covered: CardId,
    /// Position of this placement in the game history.
    pub sequence: u32,
}

/// Result of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub placement: Option<Placement>,
}

impl Transition {
    #[must_use]
    pub fn won_by(&self) -> Option<Side> {
        self.state.won_by()
    }
}

/// Result of a human click: the state, snapshot and cursor to keep, and
/// whether a card was placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub state: GameState,
    pub snapshot: MatchSnapshot,
    pub cursor: PlacementCursor,
    pub result: Result<Placement, Rejection>,
}

impl MoveOutcome {
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }

    #[must_use]
    pub fn won_by(&self) -> Option<Side> {
        self.state.won_by()
    }
}

/// The rules of the game.
#[derive(Clone, Copy, Debug)]
pub struct MatchEngine {
    side_piles: usize,
}

impl MatchEngine {
    /// Engine that redeals `side_piles` piles per side.
    #[must_use]
    pub fn new(side_piles: usize) -> Self {
        Self { side_piles }
    }

    #[must_use]
    pub fn side_piles(&self) -> usize {
        self.side_piles
    }

    /// Winner of the game, if it is over.
    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> Option<Side> {
        state.won_by()
    }

    /// The visible card at `target`, if it is still `card`.
    pub fn check_target<'s>(
        &self,
        state: &'s GameState,
        target: PileLocator,
        card: CardId,
    ) -> Result<&'s Card, Rejection> {
        if state.is_over() {
            return Err(Rejection::GameOver);
        }
        let pile = state.pile(target).ok_or(Rejection::UnknownPile(target))?;
        match pile.top() {
            Some(top) if top.id == card => Ok(top),
            _ => Err(Rejection::Stale { target, card }),
        }
    }

    /// Apply an action without consulting any match set.
    ///
    /// Placements still refuse a finished game and a stale target.
    pub fn apply(&self, state: &GameState, action: &Action) -> Result<Transition, Rejection> {
        match *action {
            Action::Place { actor, target, card } => {
                self.check_target(state, target, card)?;
                Ok(self.place(state, actor, target, card))
            }
            Action::Redeal => {
                if state.is_over() {
                    return Err(Rejection::GameOver);
                }
                Ok(Transition {
                    state: redeal::recycle(state, self.side_piles),
                    placement: None,
                })
            }
        }
    }

    fn place(&self, state: &GameState, actor: Side, target: PileLocator, covered: CardId) -> Transition {
        let mut next = state.clone();

        let Some(card) = next.side_mut(actor).hand.pop_top() else {
            panic!("{} hand underflow: placement attempted with an empty hand", actor);
        };
        let card = card.tagged(Provenance::from(actor));

        match next.pile_mut(target) {
            Some(pile) => pile.push_top(card),
            None => panic!("pile {} vanished during placement", target),
        }

        let action = Action::place(actor, target, covered);
        let sequence = next.record(action, Some(card.id));

        debug!(%actor, %target, card = %card.face, hand = next.hand_size(actor), "placed card");

        if next.hand(actor).is_empty() {
            info!(winner = %actor, moves = next.history().len(), "hand emptied, game won");
            next.set_won_by(actor);
        }

        Transition {
            state: next,
            placement: Some(Placement {
                actor,
                target,
                card: card.id,
                covered,
                sequence,
            }),
        }
    }

    /// Validate and apply a placement against an explicit candidate list.
    ///
    /// This is how the automated side moves: its candidates come from the
    /// controller, not from the click cursor.
    pub fn attempt_listed(
        &self,
        state: &GameState,
        candidates: &MatchSet,
        actor: Side,
        target: PileLocator,
        card: CardId,
    ) -> Result<Transition, Rejection> {
        let top = self.check_target(state, target, card)?;
        if !candidates.contains(top) {
            return Err(Rejection::NotMatched(card));
        }
        Ok(self.place(state, actor, target, card))
    }

    /// Validate and apply a click on the pile top `card` at `target`.
    ///
    /// Unless the click continues the armed run, the actor's tracked
    /// matches are recomputed and the cursor re-armed to the card's rank
    /// before validating. A refused click still returns that refresh so the
    /// caller can show the current matches.
    pub fn attempt_move(
        &self,
        state: &GameState,
        snapshot: &MatchSnapshot,
        cursor: PlacementCursor,
        actor: Side,
        target: PileLocator,
        card: CardId,
    ) -> MoveOutcome {
        let unchanged = |result| MoveOutcome {
            state: state.clone(),
            snapshot: snapshot.clone(),
            cursor,
            result: Err(result),
        };

        let top = match self.check_target(state, target, card) {
            Ok(top) => top,
            Err(rejection) => {
                trace!(%actor, %target, %rejection, "ignored click");
                return unchanged(rejection);
            }
        };

        let mut snapshot = snapshot.clone();
        let mut cursor = cursor;
        if !cursor.continues(top, &snapshot) {
            snapshot.set_tracked(actor, find_matches(state));
            cursor.arm(top.rank());
        }

        if !snapshot.contains(top) {
            trace!(%actor, %target, rank = %top.rank(), "click on a card with no match");
            return MoveOutcome {
                state: state.clone(),
                snapshot,
                cursor,
                result: Err(Rejection::NotMatched(card)),
            };
        }

        let transition = self.place(state, actor, target, card);
        MoveOutcome {
            state: transition.state,
            snapshot,
            cursor,
            result: transition.placement.ok_or(Rejection::GameOver),
        }
    }

    /// Redeal if no matches remain.
    pub fn try_redeal(
        &self,
        state: &GameState,
        snapshot: &MatchSnapshot,
    ) -> Result<GameState, RedealRejected> {
        redeal::try_redeal(state, snapshot, self.side_piles)
    }

    /// Clear the provenance tag left by the placement of `card` recorded at
    /// `sequence`.
    ///
    /// Returns `None` when there is nothing to do: the card has been placed
    /// again since, it is no longer on a pile, or its tag was already
    /// cleared.
    #[must_use]
    pub fn reset_provenance(&self, state: &GameState, card: CardId, sequence: u32) -> Option<GameState> {
        if state.last_placement_of(card) != Some(sequence) {
            trace!(%card, sequence, "provenance reset superseded");
            return None;
        }
        let mut next = state.clone();
        next.retag(card, Provenance::None).then_some(next)
    }

    /// Re-apply recorded actions on top of `initial`.
    pub fn replay<'a>(
        &self,
        initial: &GameState,
        records: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Result<GameState, Rejection> {
        let mut state = initial.clone();
        for record in records {
            state = self.apply(&state, &record.action)?.state;
        }
        Ok(state)
    }
}
