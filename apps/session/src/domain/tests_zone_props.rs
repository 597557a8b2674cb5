//! Property tests for zone manager invariants during selection.

use proptest::prelude::*;

use crate::domain::rules::{HAND_SIZE, POOL_SIZE};
use crate::domain::test_state_helpers::{apply_zone_op, fill_hand, pool_ids, selecting_session};
use crate::domain::zones::ZoneName;
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: hand + pool always hold the 34 dealt tiles, no id twice,
    /// and the hand never exceeds 13, whatever the user does.
    #[test]
    fn prop_selection_conserves_tiles(
        seed in test_gens::seed(),
        ops in test_gens::zone_ops(),
    ) {
        let mut s = selecting_session(seed);
        for op in &ops {
            let _ = apply_zone_op(&mut s, op);
            let board = s.phase().board().expect("board while selecting");
            prop_assert_eq!(board.zones.hand().len() + board.zones.pool().len(), POOL_SIZE);
            prop_assert!(board.zones.hand().len() <= HAND_SIZE);
            prop_assert!(s.check_invariants().is_ok(), "{:?}", s.check_invariants());
        }
    }

    /// Property: moving into a full hand is rejected and changes nothing.
    #[test]
    fn prop_full_hand_rejects_moves(
        seed in test_gens::seed(),
        pick in 0usize..21,
        at in proptest::option::of(0usize..14),
    ) {
        let mut s = selecting_session(seed);
        fill_hand(&mut s);
        let before = s.phase().clone();
        let pool = pool_ids(&s);
        let id = pool[pick % pool.len()];

        let err = s.move_tile(id, ZoneName::Pool, ZoneName::Hand, at).unwrap_err();
        prop_assert_eq!(err.validation_kind(), Some(&ValidationKind::HandFull));
        prop_assert_eq!(s.phase(), &before);
    }

    /// Property: reorder(zone, i, i) never changes contents or order.
    #[test]
    fn prop_reorder_same_index_is_identity(
        seed in test_gens::seed(),
        ops in test_gens::zone_ops(),
        zone in test_gens::zone_name(),
        i in 0usize..40,
    ) {
        let mut s = selecting_session(seed);
        for op in &ops {
            let _ = apply_zone_op(&mut s, op);
        }
        let before = s.phase().clone();
        prop_assert!(!s.reorder_zone(zone, i, i).unwrap());
        prop_assert_eq!(s.phase(), &before);
    }
}

#[test]
fn zone_intents_are_rejected_outside_selection() {
    let mut s = crate::domain::test_state_helpers::playing_session(5);
    let id = pool_ids(&s)[0];
    let err = s
        .move_tile(id, ZoneName::Pool, ZoneName::Hand, None)
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
    let err = s.reset_selection().unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));

    // Reordering the pool is still allowed during play.
    assert!(s.reorder_zone(ZoneName::Pool, 0, 1).unwrap());
}
