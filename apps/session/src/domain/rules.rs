//! Fixed table constants for the practice match.

/// Distinct tile faces.
pub const KIND_COUNT: usize = 34;
pub const COPIES_PER_KIND: usize = 4;
pub const DECK_SIZE: usize = KIND_COUNT * COPIES_PER_KIND;

/// Tiles dealt to each side at round start.
pub const POOL_SIZE: usize = 34;
pub const HAND_SIZE: usize = 13;
/// What the opponent keeps back after choosing its hand.
pub const RESERVE_SIZE: usize = POOL_SIZE - HAND_SIZE;

/// First side to reach this many points wins the match.
pub const MATCH_POINT_TARGET: u32 = 5;

/// Points awarded for a win. Flat one point per han, never less than one.
pub fn points_for_han(han: u32) -> u32 {
    han.max(1)
}
