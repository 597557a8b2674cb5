// Proptest generators for domain types.
// Zone operations pick tiles by position so every generated op names a tile
// that exists at the time it is applied (positions wrap modulo zone length).

use proptest::prelude::*;

use crate::domain::zones::ZoneName;

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

pub fn zone_name() -> impl Strategy<Value = ZoneName> {
    prop_oneof![Just(ZoneName::Hand), Just(ZoneName::Pool)]
}

/// A selection-phase intent expressed against zone positions.
#[derive(Debug, Clone)]
pub enum ZoneOp {
    Move {
        pick: usize,
        from: ZoneName,
        to: ZoneName,
        at: Option<usize>,
    },
    Reorder {
        zone: ZoneName,
        from: usize,
        to: usize,
    },
    Reset,
    Sort(ZoneName),
}

pub fn zone_op() -> impl Strategy<Value = ZoneOp> {
    prop_oneof![
        // Moves dominate so hands actually fill up.
        6 => (0usize..40, zone_name(), zone_name(), proptest::option::of(0usize..40))
            .prop_map(|(pick, from, to, at)| ZoneOp::Move { pick, from, to, at }),
        2 => (zone_name(), 0usize..40, 0usize..40)
            .prop_map(|(zone, from, to)| ZoneOp::Reorder { zone, from, to }),
        1 => Just(ZoneOp::Reset),
        1 => zone_name().prop_map(ZoneOp::Sort),
    ]
}

pub fn zone_ops() -> impl Strategy<Value = Vec<ZoneOp>> {
    prop::collection::vec(zone_op(), 1..60)
}
