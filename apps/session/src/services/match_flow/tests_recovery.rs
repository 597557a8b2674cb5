use std::time::Duration;

use super::MatchService;
use crate::config::session::SessionConfig;
use crate::domain::{PhaseSnapshot, SessionSnapshot, ZoneName};
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

fn service(seed: u64) -> MatchService {
    let config = SessionConfig::default()
        .with_match_seed(seed)
        .with_opponent_delay(Duration::ZERO);
    MatchService::new(config).unwrap()
}

/// Drop one pool tile behind the session's back.
fn lose_pool_tile(svc: &MatchService) -> SessionSnapshot {
    let (_, snap) = svc
        .mutate("lose_pool_tile", |s| {
            let board = s
                .board_mut()
                .ok_or_else(|| DomainError::invariant("no board"))?;
            let id = board.zones.pool()[0].id;
            board.zones.take_from_pool(id).map(|_| ())
        })
        .unwrap();
    snap
}

fn assert_redealt(snap: &SessionSnapshot, round: u32) {
    let PhaseSnapshot::Selecting(sel) = &snap.phase else {
        panic!("expected selecting, got {}", snap.phase.name());
    };
    assert_eq!(sel.pool.len(), 34);
    assert!(sel.hand.is_empty());
    assert!(!snap.is_busy);
    assert_eq!(snap.round, round);
    assert_eq!(
        snap.last_error.as_ref().map(|f| f.code),
        Some(ErrorCode::InvariantViolation)
    );
}

#[test]
fn broken_selection_is_redealt() {
    let svc = service(31);
    let dealt = svc.start_match().unwrap();

    let snap = lose_pool_tile(&svc);
    assert_redealt(&snap, dealt.round);
    assert_eq!(svc.snapshot(), snap);

    // The fresh deal takes intents again.
    let PhaseSnapshot::Selecting(sel) = &snap.phase else {
        unreachable!()
    };
    let moved = svc
        .move_tile(sel.pool[0].id, ZoneName::Pool, ZoneName::Hand, None)
        .unwrap();
    assert!(moved.last_error.is_none());
}

#[tokio::test]
async fn broken_table_during_play_is_redealt() {
    let svc = service(32);
    let dealt = svc.start_match().unwrap();
    let PhaseSnapshot::Selecting(sel) = &dealt.phase else {
        unreachable!()
    };
    for tile in sel.pool.iter().take(13) {
        svc.move_tile(tile.id, ZoneName::Pool, ZoneName::Hand, None)
            .unwrap();
    }
    let playing = svc.confirm_selection().await.unwrap();
    assert_eq!(playing.phase.name(), "playing");

    let snap = lose_pool_tile(&svc);
    assert_redealt(&snap, playing.round);
}
