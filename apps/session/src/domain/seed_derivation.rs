//! RNG seed derivation utilities for deterministic match behavior.
//!
//! A match carries one base seed. Every random choice in a round (the deal,
//! the opponent's hand selection and discards) gets its own seed derived from
//! that base, so replaying a match seed replays the whole match.

/// Derive a seed for shuffling the deck of a round.
///
/// # Arguments
///
/// * `match_seed` - Base seed of the match
/// * `round` - Round number (1-based)
/// * `redeal` - How many times this round has been re-dealt during selection
pub fn derive_dealing_seed(match_seed: u64, round: u32, redeal: u32) -> u64 {
    match_seed
        .wrapping_add(u64::from(round).wrapping_mul(1_000_000))
        .wrapping_add(u64::from(redeal).wrapping_mul(1_000))
        .wrapping_add(2)
}

/// Derive a seed for the opponent simulator in a round.
///
/// Distinct from the dealing seed of the same round so the opponent's choices
/// are not correlated with the shuffle.
pub fn derive_opponent_seed(match_seed: u64, round: u32) -> u64 {
    match_seed
        .wrapping_add(u64::from(round).wrapping_mul(10_000))
        .wrapping_add(1)
}
