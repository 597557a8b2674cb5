//! Turn controller tests: alternation, busy guards, stale tickets, draws.

use proptest::prelude::*;

use crate::domain::rules::{HAND_SIZE, RESERVE_SIZE};
use crate::domain::state::{PendingKind, Phase, Resolution, RoundIntent, Side};
use crate::domain::test_state_helpers::{
    fill_hand, first_thirteen, hand_ids, is_playing, play_quiet_exchange, playing_session,
    pool_ids, selecting_session, winning_verdict,
};
use crate::domain::verdict::{TenpaiVerdict, WinVerdict};
use crate::domain::zones::ZoneName;
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::errors::ErrorCode;

fn oracle_down() -> DomainError {
    DomainError::infra(InfraErrorKind::OracleUnavailable, "connection refused")
}

#[test]
fn confirm_needs_thirteen_tiles() {
    let mut s = selecting_session(1);
    let err = s.begin_confirm(false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::HandSizeMismatch));
    assert!(!s.can_confirm());

    fill_hand(&mut s);
    assert!(s.can_confirm());
    assert!(s.begin_confirm(false).unwrap().is_none());
    assert!(is_playing(&s));
    assert_eq!(s.phase().turn(), Some(Side::Player));
    assert!(s.can_discard());
}

#[test]
fn player_discard_flips_turn_and_waits_for_opponent_ron() {
    let mut s = playing_session(2);
    let id = pool_ids(&s)[3];
    let check = s.begin_player_discard(id).unwrap();

    assert!(matches!(check.kind, PendingKind::OpponentRon { tile } if tile.id == id));
    assert_eq!(s.phase().turn(), Some(Side::Opponent));
    assert!(s.is_busy());
    assert!(s.is_awaiting_oracle());
    let board = s.phase().board().unwrap();
    assert_eq!(board.player_discards.last().map(|t| t.id), Some(id));
    assert!(!pool_ids(&s).contains(&id));
}

#[test]
fn second_discard_while_busy_is_rejected_without_change() {
    let mut s = playing_session(3);
    let ids = pool_ids(&s);
    s.begin_player_discard(ids[0]).unwrap();
    let before = s.phase().clone();
    let pending_before = s.pending().cloned();

    let err = s.begin_player_discard(ids[1]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::Busy));
    assert_eq!(s.phase(), &before);
    assert_eq!(s.pending().cloned(), pending_before);

    let err = s.reorder_zone(ZoneName::Pool, 0, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::Busy));
}

#[test]
fn oracle_failure_is_a_non_win_with_a_fault() {
    let mut s = playing_session(4);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();

    assert_eq!(s.resolve_opponent_ron(check.ticket, Err(oracle_down())), Resolution::Applied);
    assert!(is_playing(&s));
    assert!(!s.is_busy());
    assert_eq!(s.last_error().map(|f| f.code), Some(ErrorCode::OracleUnavailable));

    // Opponent still takes its turn and the player can discard again.
    let thinking = s.begin_opponent_turn().unwrap().unwrap();
    let pick = s.opponent_view().unwrap().first_reserve().unwrap();
    let Resolution::Next(ron) = s.apply_opponent_discard(thinking.ticket, pick).unwrap() else {
        panic!("expected player ron check");
    };
    s.resolve_player_ron(ron.ticket, Err(oracle_down()));
    assert!(s.can_discard());
    let next = pool_ids(&s)[0];
    s.begin_player_discard(next).unwrap();
    assert!(s.last_error().is_none(), "accepted intent clears the banner");
}

#[test]
fn opponent_win_finishes_round_and_scores() {
    let mut s = playing_session(5);
    let id = pool_ids(&s)[0];
    let tile_kind = s
        .phase()
        .board()
        .unwrap()
        .zones
        .pool()
        .iter()
        .find(|t| t.id == id)
        .unwrap()
        .kind;
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(winning_verdict(3)));

    let Phase::Finished(done) = s.phase() else {
        panic!("expected finished, got {}", s.phase().name());
    };
    assert_eq!(done.winning.winner, Side::Opponent);
    assert_eq!(done.winning.winning_tile, tile_kind);
    assert_eq!(done.winning.points, 3);
    assert_eq!(s.score().opponent, 3);
    assert!(!s.is_busy());
    s.check_invariants().unwrap();
}

#[test]
fn player_win_on_opponent_discard() {
    let mut s = playing_session(6);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(WinVerdict::no_win()));
    let thinking = s.begin_opponent_turn().unwrap().unwrap();
    assert!(!s.is_awaiting_oracle(), "thinking is busy but not an oracle wait");
    assert!(s.is_busy());

    let pick = s.opponent_view().unwrap().first_reserve().unwrap();
    let Resolution::Next(ron) = s.apply_opponent_discard(thinking.ticket, pick).unwrap() else {
        panic!("expected player ron check");
    };
    let query = s.win_query(&ron).unwrap();
    assert_eq!(query.hand.len(), HAND_SIZE);
    s.resolve_player_ron(ron.ticket, Ok(winning_verdict(0)));

    let Phase::Finished(done) = s.phase() else {
        panic!("expected finished");
    };
    assert_eq!(done.winning.winner, Side::Player);
    assert_eq!(s.score().player, 1, "zero han still scores one point");
}

#[test]
fn stale_tickets_never_mutate_the_session() {
    let mut s = playing_session(7);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();

    s.return_to_title();
    let epoch = s.epoch();
    assert_eq!(s.resolve_opponent_ron(check.ticket, Ok(winning_verdict(5))), Resolution::Stale);
    assert!(matches!(s.phase(), Phase::Title));
    assert_eq!(s.score().opponent, 0);
    assert_eq!(s.epoch(), epoch);
}

#[test]
fn mismatched_check_kind_is_stale_and_keeps_pending() {
    let mut s = playing_session(8);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();
    assert_eq!(s.resolve_player_ron(check.ticket, Ok(winning_verdict(1))), Resolution::Stale);
    assert_eq!(s.pending(), Some(&check));
}

#[test]
fn opponent_discard_outside_reserve_keeps_thinking() {
    let mut s = playing_session(9);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(WinVerdict::no_win()));
    let thinking = s.begin_opponent_turn().unwrap().unwrap();

    let foreign = hand_ids(&s)[0];
    let err = s.apply_opponent_discard(thinking.ticket, foreign).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::TileNotInZone));
    assert_eq!(s.pending(), Some(&thinking));
}

#[test]
fn tenpai_gate_rejects_and_fails_open() {
    let mut s = selecting_session(10);
    fill_hand(&mut s);
    let gate = s.begin_confirm(true).unwrap().unwrap();
    assert!(s.is_awaiting_oracle());
    assert!(!s.can_confirm());

    let not_tenpai = TenpaiVerdict {
        is_tenpai: false,
        waiting_tiles: vec![],
    };
    let err = s.resolve_tenpai_gate(gate.ticket, Ok(not_tenpai)).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotTenpai));
    assert!(matches!(s.phase(), Phase::Selecting(_)));
    assert!(!s.is_busy());

    let gate = s.begin_confirm(true).unwrap().unwrap();
    s.resolve_tenpai_gate(gate.ticket, Err(oracle_down())).unwrap();
    assert!(is_playing(&s));
    assert!(s.last_error().is_some());
}

#[test]
fn redeal_stales_outstanding_gate() {
    let mut s = selecting_session(11);
    fill_hand(&mut s);
    let gate = s.begin_confirm(true).unwrap().unwrap();
    // Busy sessions refuse to re-deal; a return to title is the only way out.
    let err = s.prepare_round(RoundIntent::Redeal).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::Busy));

    s.return_to_title();
    let setup = s.prepare_round(RoundIntent::StartMatch).unwrap();
    let opp = first_thirteen(&setup);
    s.install_round(setup, &opp).unwrap();
    let verdict = TenpaiVerdict {
        is_tenpai: true,
        waiting_tiles: vec![],
    };
    assert_eq!(s.resolve_tenpai_gate(gate.ticket, Ok(verdict)).unwrap(), Resolution::Stale);
    assert!(matches!(s.phase(), Phase::Selecting(_)));
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: discards alternate player, opponent, player, ... and a round
    /// with no wins ends in exactly one draw after every reserve tile is gone.
    #[test]
    fn prop_quiet_round_alternates_then_draws_once(seed in test_gens::seed()) {
        let mut s = playing_session(seed);
        let mut exchanges = 0;
        while is_playing(&s) {
            play_quiet_exchange(&mut s);
            exchanges += 1;
            prop_assert!(exchanges <= RESERVE_SIZE, "round did not end");
            prop_assert!(s.check_invariants().is_ok());
        }
        prop_assert_eq!(exchanges, RESERVE_SIZE);

        let Phase::Draw(board) = s.phase() else {
            return Err(TestCaseError::fail(format!("expected draw, got {}", s.phase().name())));
        };
        for (i, (side, _)) in board.discard_log.iter().enumerate() {
            let expected = if i % 2 == 0 { Side::Player } else { Side::Opponent };
            prop_assert_eq!(*side, expected);
        }
        prop_assert_eq!(board.discard_log.len(), 2 * RESERVE_SIZE);

        // Nothing re-enters draw: turn intents are rejected and the phase holds.
        let before = s.phase().clone();
        prop_assert!(s.begin_opponent_turn().is_err());
        prop_assert_eq!(s.phase(), &before);
    }
}
