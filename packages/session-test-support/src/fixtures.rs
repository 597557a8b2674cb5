//! Fixed deals.

use mahjong_session::domain::parse_compact;
use mahjong_session::TileKind;

/// Hand the tutorial walks the player into: wins on 3s or 6s.
pub const TUTORIAL_HAND: &str = "123m456p999s45s22z";

/// Remaining 21 tiles of the tutorial player pool, none of them 3s or 6s.
const TUTORIAL_POOL_REST: &str = "1122277m1188p11228s11447z";

/// Opponent pool for the tutorial: a hopeless first 13 (what a first-tiles
/// opponent keeps), then a reserve that leads with the player's 3s.
const TUTORIAL_OPPONENT_HAND: &str = "147m258p369s1234z";
const TUTORIAL_OPPONENT_RESERVE: &str = "3s33344455556666788889m";

pub fn kinds(compact: &str) -> Vec<TileKind> {
    parse_compact(compact).unwrap_or_else(|e| panic!("bad fixture {compact}: {e}"))
}

pub fn tutorial_hand() -> Vec<TileKind> {
    kinds(TUTORIAL_HAND)
}

/// Player pool: the tutorial hand first, then filler.
pub fn tutorial_pool() -> Vec<TileKind> {
    let mut pool = tutorial_hand();
    pool.extend(kinds(TUTORIAL_POOL_REST));
    pool
}

pub fn tutorial_opponent_pool() -> Vec<TileKind> {
    let mut pool = kinds(TUTORIAL_OPPONENT_HAND);
    pool.extend(kinds(TUTORIAL_OPPONENT_RESERVE));
    pool
}

pub fn tutorial_dora_indicator() -> TileKind {
    kinds("9p")[0]
}

pub fn tile(code: &str) -> TileKind {
    kinds(code)[0]
}
