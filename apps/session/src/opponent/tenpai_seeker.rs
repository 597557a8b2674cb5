//! Tenpai-seeking opponent.
//!
//! Chooses a 13-tile hand that is one tile from winning whenever its pool
//! allows one, then keeps its own winning tiles out of its discards so the
//! player can still deal into it.

use std::sync::Mutex;

use rand::prelude::*;

use super::random::RandomOpponent;
use super::trait_def::{OpponentError, OpponentStrategy};
use crate::domain::hand_shape::tenpai_subsets;
use crate::domain::{OpponentView, Tile, TileId, TileKind};

/// How many candidate hands to look at before picking one.
const CANDIDATES: usize = 8;

pub struct TenpaiSeeker {
    rng: Mutex<StdRng>,
    fallback: RandomOpponent,
}

impl TenpaiSeeker {
    pub const NAME: &'static str = "tenpai";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            fallback: RandomOpponent::new(seed.map(|s| s.wrapping_add(1))),
        }
    }
}

/// Map chosen kinds back onto distinct tiles of `pool`.
fn ids_for_kinds(pool: &[Tile], kinds: &[TileKind]) -> Option<Vec<TileId>> {
    let mut used = vec![false; pool.len()];
    kinds
        .iter()
        .map(|&k| {
            let idx = (0..pool.len()).find(|&i| !used[i] && pool[i].kind == k)?;
            used[idx] = true;
            Some(pool[idx].id)
        })
        .collect()
}

impl OpponentStrategy for TenpaiSeeker {
    fn choose_hand(
        &self,
        pool: &[Tile],
        dora_indicator: TileKind,
    ) -> Result<Vec<TileId>, OpponentError> {
        let kinds: Vec<TileKind> = pool.iter().map(|t| t.kind).collect();
        let candidates = tenpai_subsets(&kinds, CANDIDATES);
        let picked = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| OpponentError::Internal(format!("RNG lock poisoned: {e}")))?;
            candidates.choose(&mut *rng).cloned()
        };
        match picked.and_then(|hand| ids_for_kinds(pool, &hand)) {
            Some(ids) => Ok(ids),
            None => {
                tracing::debug!("no tenpai hand in opponent pool; choosing at random");
                self.fallback.choose_hand(pool, dora_indicator)
            }
        }
    }

    fn choose_discard(&self, view: &OpponentView) -> Result<TileId, OpponentError> {
        let waits = view.waits();
        let safe: Vec<&Tile> = view
            .reserve
            .iter()
            .filter(|t| !waits.contains(&t.kind))
            .collect();
        if safe.is_empty() {
            return self.fallback.choose_discard(view);
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| OpponentError::Internal(format!("RNG lock poisoned: {e}")))?;
        safe.choose(&mut *rng)
            .map(|t| t.id)
            .ok_or_else(|| OpponentError::InvalidMove("reserve is empty".into()))
    }
}
