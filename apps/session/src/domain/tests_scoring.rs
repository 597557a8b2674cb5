//! Score tracking and round advancement.

use proptest::prelude::*;

use crate::domain::rules::MATCH_POINT_TARGET;
use crate::domain::state::{MatchSession, Phase, RoundIntent, Side};
use crate::domain::test_state_helpers::{
    first_thirteen, play_quiet_exchange, playing_session, pool_ids, winning_verdict,
};
use crate::domain::verdict::WinVerdict;
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::ValidationKind;

/// Play the opening discard of the current round and resolve it as `winner`.
fn win_round(s: &mut MatchSession, winner: Side, han: u32) {
    let id = pool_ids(s)[0];
    let check = s.begin_player_discard(id).unwrap();
    match winner {
        Side::Opponent => {
            s.resolve_opponent_ron(check.ticket, Ok(winning_verdict(han)));
        }
        Side::Player => {
            s.resolve_opponent_ron(check.ticket, Ok(WinVerdict::no_win()));
            let thinking = s.begin_opponent_turn().unwrap().unwrap();
            let pick = s.opponent_view().unwrap().first_reserve().unwrap();
            if let crate::domain::state::Resolution::Next(ron) =
                s.apply_opponent_discard(thinking.ticket, pick).unwrap()
            {
                s.resolve_player_ron(ron.ticket, Ok(winning_verdict(han)));
            }
        }
    }
    assert!(matches!(s.phase(), Phase::Finished(_)));
}

/// Advance to the next round and get back into play.
fn next_round(s: &mut MatchSession) {
    let setup = s.advance_round().unwrap().expect("match continues");
    let opp = first_thirteen(&setup);
    s.install_round(setup, &opp).unwrap();
    crate::domain::test_state_helpers::fill_hand(s);
    s.begin_confirm(false).unwrap();
}

#[test]
fn advance_requires_finished_or_draw() {
    let mut s = playing_session(1);
    let err = s.advance_round().unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn advance_deals_next_round_and_keeps_score() {
    let mut s = playing_session(2);
    win_round(&mut s, Side::Player, 2);
    let epoch = s.epoch();
    next_round(&mut s);
    assert_eq!(s.round(), 2);
    assert_eq!(s.score().player, 2);
    assert!(s.epoch() > epoch);
    s.check_invariants().unwrap();
}

#[test]
fn reaching_target_routes_advance_to_title() {
    let mut s = playing_session(3);
    win_round(&mut s, Side::Player, MATCH_POINT_TARGET);
    assert!(s.is_match_over());
    assert!(s.advance_round().unwrap().is_none());
    assert!(matches!(s.phase(), Phase::Title));
    assert_eq!(s.score().player, 0);
    assert_eq!(s.round(), 0);
}

#[test]
fn draw_advances_like_a_finished_round() {
    let mut s = playing_session(4);
    while matches!(s.phase(), Phase::Playing(_)) {
        play_quiet_exchange(&mut s);
    }
    assert!(matches!(s.phase(), Phase::Draw(_)));
    let setup = s.advance_round().unwrap().unwrap();
    assert_eq!(setup.deal.pool.len(), 34);
    assert_eq!(setup.deal.opponent_pool.len(), 34);
    let opp = first_thirteen(&setup);
    s.install_round(setup, &opp).unwrap();
    assert!(matches!(s.phase(), Phase::Selecting(_)));
    assert_eq!(s.score(), Default::default());
}

#[test]
fn new_match_starts_from_zero() {
    let mut s = playing_session(5);
    win_round(&mut s, Side::Opponent, MATCH_POINT_TARGET + 2);
    assert!(s.advance_round().unwrap().is_none());
    let setup = s.prepare_round(RoundIntent::StartMatch).unwrap();
    let opp = first_thirteen(&setup);
    s.install_round(setup, &opp).unwrap();
    assert_eq!(s.round(), 1);
    assert_eq!(s.score().opponent, 0);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: scores never decrease during a match, and the match is over
    /// exactly when a side has reached the target.
    #[test]
    fn prop_score_is_monotone_until_match_end(
        seed in test_gens::seed(),
        wins in prop::collection::vec((any::<bool>(), 0u32..4), 1..12),
    ) {
        let mut s = playing_session(seed);
        let mut last = s.score();
        for (player_wins, han) in wins {
            let winner = if player_wins { Side::Player } else { Side::Opponent };
            win_round(&mut s, winner, han);
            let now = s.score();
            prop_assert!(now.player >= last.player && now.opponent >= last.opponent);
            prop_assert_eq!(
                s.is_match_over(),
                now.player >= MATCH_POINT_TARGET || now.opponent >= MATCH_POINT_TARGET
            );
            last = now;
            if s.is_match_over() {
                prop_assert!(s.advance_round().unwrap().is_none());
                prop_assert!(matches!(s.phase(), Phase::Title));
                break;
            }
            next_round(&mut s);
        }
    }
}
