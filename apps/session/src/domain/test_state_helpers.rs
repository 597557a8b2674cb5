//! Builders for sessions in a given phase, used across domain tests.

use crate::domain::rules::HAND_SIZE;
use crate::domain::state::{MatchSession, Phase, RoundIntent, RoundSetup};
use crate::domain::test_gens::ZoneOp;
use crate::domain::tiles_types::TileId;
use crate::domain::verdict::WinVerdict;
use crate::domain::zones::ZoneName;
use crate::errors::domain::DomainError;

/// Opponent picks the first 13 tiles of its pool.
pub fn first_thirteen(setup: &RoundSetup) -> Vec<TileId> {
    setup
        .deal
        .opponent_pool
        .iter()
        .take(HAND_SIZE)
        .map(|t| t.id)
        .collect()
}

pub fn selecting_session(seed: u64) -> MatchSession {
    let mut s = MatchSession::new(seed);
    let setup = s.prepare_round(RoundIntent::StartMatch).unwrap();
    let hand = first_thirteen(&setup);
    s.install_round(setup, &hand).unwrap();
    s
}

/// Move the first 13 pool tiles into the hand.
pub fn fill_hand(s: &mut MatchSession) {
    for _ in 0..HAND_SIZE {
        let id = pool_ids(s)[0];
        s.move_tile(id, ZoneName::Pool, ZoneName::Hand, None).unwrap();
    }
}

pub fn playing_session(seed: u64) -> MatchSession {
    let mut s = selecting_session(seed);
    fill_hand(&mut s);
    assert!(s.begin_confirm(false).unwrap().is_none());
    s
}

pub fn pool_ids(s: &MatchSession) -> Vec<TileId> {
    s.phase()
        .board()
        .map(|b| b.zones.pool().iter().map(|t| t.id).collect())
        .unwrap_or_default()
}

pub fn hand_ids(s: &MatchSession) -> Vec<TileId> {
    s.phase()
        .board()
        .map(|b| b.zones.hand().iter().map(|t| t.id).collect())
        .unwrap_or_default()
}

/// Apply a generated op; rejected ops are fine, panics are not.
pub fn apply_zone_op(s: &mut MatchSession, op: &ZoneOp) -> Result<(), DomainError> {
    match op {
        ZoneOp::Move { pick, from, to, at } => {
            let ids = match from {
                ZoneName::Hand => hand_ids(s),
                ZoneName::Pool => pool_ids(s),
            };
            let Some(&id) = ids.get(pick % ids.len().max(1)) else {
                return Ok(());
            };
            s.move_tile(id, *from, *to, *at)
        }
        ZoneOp::Reorder { zone, from, to } => s.reorder_zone(*zone, *from, *to).map(|_| ()),
        ZoneOp::Reset => s.reset_selection(),
        ZoneOp::Sort(zone) => s.sort_zone(*zone),
    }
}

/// Play one full exchange with nobody winning: player discards the first pool
/// tile, the opponent discards its first reserve tile.
pub fn play_quiet_exchange(s: &mut MatchSession) {
    let id = pool_ids(s)[0];
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(WinVerdict::no_win()));
    let Some(thinking) = s.begin_opponent_turn().unwrap() else {
        return;
    };
    let view = s.opponent_view().unwrap();
    let pick = view.first_reserve().unwrap();
    if let crate::domain::state::Resolution::Next(ron) =
        s.apply_opponent_discard(thinking.ticket, pick).unwrap()
    {
        s.resolve_player_ron(ron.ticket, Ok(WinVerdict::no_win()));
    }
}

pub fn is_playing(s: &MatchSession) -> bool {
    matches!(s.phase(), Phase::Playing(_))
}

pub fn winning_verdict(han: u32) -> WinVerdict {
    WinVerdict {
        is_winning: true,
        yaku: vec!["Riichi".to_string()],
        han,
        fu: Some(30),
    }
}
