//! Snapshot shape per phase, including what stays hidden.

use serde_json::Value;

use crate::domain::snapshot::{snapshot, PhaseSnapshot};
use crate::domain::state::{MatchSession, Side};
use crate::domain::test_state_helpers::{playing_session, pool_ids, selecting_session, winning_verdict};

fn json(s: &MatchSession) -> Value {
    serde_json::to_value(snapshot(s)).unwrap()
}

#[test]
fn title_snapshot_is_minimal() {
    let v = json(&MatchSession::new(1));
    assert_eq!(v["phase"]["phase"], "title");
    assert!(v["phase"].get("data").is_none());
    assert_eq!(v["round"], 0);
    assert_eq!(v["isBusy"], false);
    assert!(v["lastError"].is_null());
}

#[test]
fn selecting_snapshot_hides_opponent_tiles() {
    let s = selecting_session(2);
    let v = json(&s);
    assert_eq!(v["phase"]["phase"], "selecting");
    let data = &v["phase"]["data"];
    assert_eq!(data["pool"].as_array().unwrap().len(), 34);
    assert_eq!(data["handCapacity"], 13);
    assert_eq!(data["opponentHandCount"], 13);
    assert!(data.get("opponentHand").is_none());
    assert!(v["dora"].is_string());
    assert!(v["doraBonus"].is_string());
    assert_eq!(v["canConfirm"], false);
}

#[test]
fn playing_snapshot_reports_turn_and_last_discard() {
    let mut s = playing_session(3);
    let id = pool_ids(&s)[0];
    s.begin_player_discard(id).unwrap();

    let snap = snapshot(&s);
    assert!(snap.is_awaiting_oracle);
    assert!(!snap.can_discard);
    let PhaseSnapshot::Playing(p) = &snap.phase else {
        panic!("expected playing");
    };
    assert_eq!(p.turn, Side::Opponent);
    assert_eq!(p.table.last_discard.as_ref().map(|d| d.tile.id), Some(id));
    assert_eq!(p.opponent_reserve_count, 21);

    let v = json(&s);
    assert_eq!(v["phase"]["data"]["turn"], "opponent");
    assert!(v["phase"]["data"].get("opponentHand").is_none());
}

#[test]
fn finished_snapshot_reveals_opponent_hand() {
    let mut s = playing_session(4);
    let id = pool_ids(&s)[0];
    let check = s.begin_player_discard(id).unwrap();
    s.resolve_opponent_ron(check.ticket, Ok(winning_verdict(2)));

    let v = json(&s);
    assert_eq!(v["phase"]["phase"], "finished");
    let data = &v["phase"]["data"];
    assert_eq!(data["opponentHand"].as_array().unwrap().len(), 13);
    assert_eq!(data["winning"]["winner"], "opponent");
    assert_eq!(data["winning"]["han"], 2);
    assert_eq!(data["winning"]["yaku"][0], "Riichi");
    assert_eq!(v["score"]["opponent"], 2);
}
