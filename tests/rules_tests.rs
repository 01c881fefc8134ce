//! Rules integration tests: matching, placement, win and redeal on fixed
//! table layouts.

use pile_match::cards::{Card, Face, Provenance, Rank, Suit};
use pile_match::core::{Action, CardId, GameState, PileLocator, Side, SideState};
use pile_match::error::{RedealRejected, Rejection};
use pile_match::rules::{find_matches, MatchEngine, MatchSnapshot, PlacementCursor};
use pile_match::zones::{Hand, Pile};

fn card(id: u32, rank: u8) -> Card {
    Card::new(CardId(id), Face::new(Suit::Diamonds, Rank::new(rank)))
}

fn hand(ids: std::ops::Range<u32>, rank: u8) -> Hand {
    ids.map(|i| card(i, rank)).collect()
}

/// Builds a table from pile-top ranks. Tops are numbered 1.. human row
/// first. Hands hold `hand_size` cards each, ids from 100 and 200.
fn table(human: &[u8], automated: &[u8], hand_size: u32) -> GameState {
    let mut next = 0;
    let mut row = |ranks: &[u8]| -> Vec<Pile> {
        ranks
            .iter()
            .map(|&rank| {
                next += 1;
                Pile::singleton(card(next, rank))
            })
            .collect()
    };
    let human_piles = row(human);
    let automated_piles = row(automated);
    GameState::from_sides(
        SideState::new(hand(100..100 + hand_size, 1), human_piles),
        SideState::new(hand(200..200 + hand_size, 13), automated_piles),
    )
}

fn click(
    engine: &MatchEngine,
    state: &GameState,
    target: PileLocator,
    card: u32,
) -> pile_match::rules::MoveOutcome {
    engine.attempt_move(
        state,
        &MatchSnapshot::new(),
        PlacementCursor::unarmed(),
        Side::Human,
        target,
        CardId(card),
    )
}

// =============================================================================
// Match finder
// =============================================================================

#[test]
fn test_five_of_six_match() {
    let state = table(&[5, 5, 7], &[7, 7, 9], 3);
    let ids: Vec<u32> = find_matches(&state).sorted_ids().iter().map(|id| id.raw()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_finder_is_idempotent() {
    let state = table(&[2, 3, 2, 4], &[4, 6, 8, 3], 3);
    let first = find_matches(&state);
    let second = find_matches(&state);
    assert_eq!(first.sorted_ids(), second.sorted_ids());
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_matched_target_accepts_placement() {
    let engine = MatchEngine::new(2);
    let state = table(&[5, 9], &[5, 3], 4);
    let target = PileLocator::new(Side::Automated, 0);

    let outcome = click(&engine, &state, target, 3);

    assert!(outcome.accepted());
    assert_eq!(outcome.state.hand_size(Side::Human), 3);
    let top = outcome.state.top_at(target).copied().unwrap();
    // The popped card is the top of the human hand
    assert_eq!(top.id, CardId(103));
    assert_eq!(top.placed_by, Provenance::Human);
}

#[test]
fn test_unmatched_target_leaves_table() {
    let engine = MatchEngine::new(2);
    let state = table(&[5, 9], &[5, 3], 4);

    let outcome = click(&engine, &state, PileLocator::new(Side::Human, 1), 2);

    assert_eq!(outcome.result, Err(Rejection::NotMatched(CardId(2))));
    for side in Side::ALL {
        assert_eq!(outcome.state.hand(side), state.hand(side));
        assert_eq!(outcome.state.piles(side), state.piles(side));
    }
}

#[test]
fn test_hand_card_is_never_a_target() {
    let engine = MatchEngine::new(2);
    let state = table(&[5, 9], &[5, 3], 4);

    let outcome = click(&engine, &state, PileLocator::new(Side::Human, 0), 103);
    assert!(matches!(outcome.result, Err(Rejection::Stale { .. })));
}

#[test]
fn test_emptying_hand_wins_and_freezes() {
    let engine = MatchEngine::new(2);
    let state = table(&[5, 9], &[5, 3], 1);

    let won = click(&engine, &state, PileLocator::new(Side::Human, 0), 1);
    assert_eq!(won.won_by(), Some(Side::Human));

    let after = click(&engine, &won.state, PileLocator::new(Side::Automated, 0), 3);
    assert_eq!(after.result, Err(Rejection::GameOver));
    assert_eq!(after.state, won.state);
    assert_eq!(
        engine.apply(&won.state, &Action::Redeal).err(),
        Some(Rejection::GameOver)
    );
}

// =============================================================================
// Redeal
// =============================================================================

#[test]
fn test_redeal_on_deadlock() {
    let engine = MatchEngine::new(3);
    let state = table(&[1, 2, 3], &[4, 6, 8], 5);

    let next = engine.try_redeal(&state, &MatchSnapshot::new()).unwrap();
    for side in Side::ALL {
        assert_eq!(next.piles(side).len(), 3);
        assert!(next.piles(side).iter().all(|p| p.len() == 1));
        assert_eq!(next.side(side).total_cards(), state.side(side).total_cards());
        assert!(next
            .piles(side)
            .iter()
            .filter_map(Pile::top)
            .all(|c| c.placed_by == Provenance::None));
    }
}

#[test]
fn test_redeal_rejected_with_match() {
    let engine = MatchEngine::new(3);
    let state = table(&[1, 2, 3], &[4, 6, 3], 5);

    assert_eq!(
        engine.try_redeal(&state, &MatchSnapshot::new()),
        Err(RedealRejected::MatchesRemain)
    );
}

#[test]
fn test_redeal_resets_tags_of_played_cards() {
    let engine = MatchEngine::new(2);
    let state = table(&[5, 9], &[5, 3], 4);

    // Human covers one 5 with an ace: no rank repeats afterwards
    let played = click(&engine, &state, PileLocator::new(Side::Automated, 0), 3);
    assert!(find_matches(&played.state).is_empty());

    let next = engine.try_redeal(&played.state, &MatchSnapshot::new()).unwrap();
    assert!(next.all_cards().all(|c| c.placed_by == Provenance::None));
    assert_eq!(next.side(Side::Automated).total_cards(), 7);
}
