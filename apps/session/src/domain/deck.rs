//! Deterministic tile dealing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{COPIES_PER_KIND, DECK_SIZE, POOL_SIZE};
use crate::domain::tiles_logic::{kind_counts, within_copy_limit};
use crate::domain::tiles_types::{Tile, TileIdGen, TileKind};
use crate::errors::domain::{DomainError, ValidationKind};

/// One round's allocation: the player's pool, the opponent's pool and the
/// dora indicator revealed from the undealt remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub pool: Vec<Tile>,
    pub opponent_pool: Vec<Tile>,
    pub dora: TileKind,
}

/// All 136 tiles in kind order, four copies each, with fresh ids.
pub fn full_deck(ids: &mut TileIdGen) -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for kind in TileKind::all() {
        for _ in 0..COPIES_PER_KIND {
            deck.push(ids.mint(kind));
        }
    }
    deck
}

/// Fisher-Yates shuffle from the top of the slice.
pub fn shuffle_tiles<R: Rng + ?Sized>(tiles: &mut [Tile], rng: &mut R) {
    for i in (1..tiles.len()).rev() {
        let j = rng.random_range(0..=i);
        tiles.swap(i, j);
    }
}

/// Shuffle a fresh deck with `seed` and slice it into two pools plus dora.
pub fn deal(ids: &mut TileIdGen, seed: u64) -> Result<Deal, DomainError> {
    let mut deck = full_deck(ids);
    if deck.len() != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "deck has {} tiles, expected {DECK_SIZE}",
            deck.len()
        )));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffle_tiles(&mut deck, &mut rng);

    let dora = deck[2 * POOL_SIZE].kind;
    let opponent_pool = deck[POOL_SIZE..2 * POOL_SIZE].to_vec();
    deck.truncate(POOL_SIZE);
    Ok(Deal {
        pool: deck,
        opponent_pool,
        dora,
    })
}

/// Build a fixed deal from kinds, minting fresh ids in the given order.
pub fn deal_from_kinds(
    ids: &mut TileIdGen,
    pool: &[TileKind],
    opponent_pool: &[TileKind],
    dora: TileKind,
) -> Result<Deal, DomainError> {
    if pool.len() != POOL_SIZE || opponent_pool.len() != POOL_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeal,
            format!(
                "pools must hold {POOL_SIZE} tiles each (got {} and {})",
                pool.len(),
                opponent_pool.len()
            ),
        ));
    }
    let counts = kind_counts(
        pool.iter()
            .chain(opponent_pool.iter())
            .copied()
            .chain(std::iter::once(dora)),
    );
    if !within_copy_limit(&counts) {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeal,
            "more than four copies of a kind",
        ));
    }
    Ok(Deal {
        pool: pool.iter().map(|&k| ids.mint(k)).collect(),
        opponent_pool: opponent_pool.iter().map(|&k| ids.mint(k)).collect(),
        dora,
    })
}
