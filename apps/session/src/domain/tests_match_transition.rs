use crate::domain::match_transition::{derive_match_transitions, MatchTransition};
use crate::domain::snapshot::snapshot;
use crate::domain::state::{MatchSession, Side};
use crate::domain::test_state_helpers::{
    fill_hand, playing_session, pool_ids, selecting_session, winning_verdict,
};

#[test]
fn deal_reports_phase_change_and_round_start() {
    let before = snapshot(&MatchSession::new(1));
    let after = snapshot(&selecting_session(1));
    let t = derive_match_transitions(&before, &after);
    assert!(t.contains(&MatchTransition::PhaseChanged {
        from: "title",
        to: "selecting"
    }));
    assert!(t.contains(&MatchTransition::RoundStarted { round: 1 }));
}

#[test]
fn confirm_hands_the_turn_to_the_player() {
    let mut s = selecting_session(2);
    fill_hand(&mut s);
    let before = snapshot(&s);
    s.begin_confirm(false).unwrap();
    let t = derive_match_transitions(&before, &snapshot(&s));
    assert!(t.contains(&MatchTransition::TurnBecame { side: Side::Player }));
    assert!(!t.iter().any(|x| matches!(x, MatchTransition::RoundStarted { .. })));
}

#[test]
fn winning_discard_records_win_and_match_end() {
    let mut s = playing_session(3);
    let before = snapshot(&s);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(winning_verdict(6)));
    let after = snapshot(&s);

    let t = derive_match_transitions(&before, &after);
    assert!(t.contains(&MatchTransition::WinRecorded {
        winner: Side::Opponent,
        han: 6,
        points: 6
    }));
    assert!(t.contains(&MatchTransition::MatchEnded { score: after.score }));
    assert!(!t.iter().any(|x| matches!(x, MatchTransition::TurnBecame { .. })));
}

#[test]
fn identical_snapshots_yield_nothing() {
    let s = playing_session(4);
    let snap = snapshot(&s);
    assert!(derive_match_transitions(&snap, &snap).is_empty());
}
