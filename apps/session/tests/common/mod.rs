#![allow(dead_code)]

pub mod proptest_prelude;

use std::sync::Arc;
use std::time::Duration;

use mahjong_session::domain::{PhaseSnapshot, Tile};
use mahjong_session::{MatchService, OracleClient, SessionConfig, SessionSnapshot, TileId, TileKind, ZoneName};
use session_test_support::FirstTilesOpponent;

#[ctor::ctor]
fn init_logging() {
    session_test_support::test_logging::init();
}

/// Deterministic config: fixed seed, no thinking delay, short oracle timeout.
pub fn test_config(seed: u64) -> SessionConfig {
    SessionConfig::default()
        .with_match_seed(seed)
        .with_opponent_delay(Duration::ZERO)
        .with_oracle_timeout(Duration::from_millis(500))
}

/// Service with a predictable opponent and the given oracle.
pub fn service_with(oracle: Arc<dyn OracleClient>, seed: u64) -> MatchService {
    MatchService::with_oracle(test_config(seed), oracle)
        .with_opponent_strategy(Arc::new(FirstTilesOpponent))
}

pub fn phase(snap: &SessionSnapshot) -> &'static str {
    snap.phase.name()
}

pub fn hand(snap: &SessionSnapshot) -> Vec<Tile> {
    match &snap.phase {
        PhaseSnapshot::Selecting(s) => s.hand.clone(),
        PhaseSnapshot::Playing(p) => p.table.hand.clone(),
        PhaseSnapshot::Finished(f) => f.table.hand.clone(),
        PhaseSnapshot::Draw(d) => d.table.hand.clone(),
        PhaseSnapshot::Title => Vec::new(),
    }
}

pub fn pool(snap: &SessionSnapshot) -> Vec<Tile> {
    match &snap.phase {
        PhaseSnapshot::Selecting(s) => s.pool.clone(),
        PhaseSnapshot::Playing(p) => p.table.pool.clone(),
        PhaseSnapshot::Finished(f) => f.table.pool.clone(),
        PhaseSnapshot::Draw(d) => d.table.pool.clone(),
        PhaseSnapshot::Title => Vec::new(),
    }
}

pub fn pool_ids(snap: &SessionSnapshot) -> Vec<TileId> {
    pool(snap).iter().map(|t| t.id).collect()
}

/// Move the first 13 pool tiles into the hand.
pub fn fill_hand(svc: &MatchService) -> SessionSnapshot {
    let mut snap = svc.snapshot();
    for id in pool_ids(&snap).into_iter().take(13) {
        snap = svc
            .move_tile(id, ZoneName::Pool, ZoneName::Hand, None)
            .expect("move into hand");
    }
    snap
}

/// Move one pool tile of each listed kind into the hand, in order.
pub fn select_kinds(svc: &MatchService, kinds: &[TileKind]) -> SessionSnapshot {
    let mut snap = svc.snapshot();
    for kind in kinds {
        let id = pool(&snap)
            .iter()
            .find(|t| t.kind == *kind)
            .map(|t| t.id)
            .unwrap_or_else(|| panic!("no {kind} left in pool"));
        snap = svc
            .move_tile(id, ZoneName::Pool, ZoneName::Hand, None)
            .expect("move into hand");
    }
    snap
}

/// Deal, select the first 13 tiles and confirm.
pub async fn playing(svc: &MatchService) -> SessionSnapshot {
    svc.start_match().expect("start match");
    fill_hand(svc);
    svc.confirm_selection().await.expect("confirm")
}
