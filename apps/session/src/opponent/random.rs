//! Random opponent - picks uniformly among allowed choices.
//!
//! Baseline strategy for tests and the simulator. Seeded instances are fully
//! reproducible.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{OpponentError, OpponentStrategy};
use crate::domain::rules::HAND_SIZE;
use crate::domain::{OpponentView, Tile, TileId, TileKind};

pub struct RandomOpponent {
    /// `choose_*` take `&self`, so the RNG needs interior mutability.
    rng: Mutex<StdRng>,
}

impl RandomOpponent {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, OpponentError> {
        self.rng
            .lock()
            .map_err(|e| OpponentError::Internal(format!("RNG lock poisoned: {e}")))
    }
}

impl OpponentStrategy for RandomOpponent {
    fn choose_hand(
        &self,
        pool: &[Tile],
        _dora_indicator: TileKind,
    ) -> Result<Vec<TileId>, OpponentError> {
        if pool.len() < HAND_SIZE {
            return Err(OpponentError::Internal(format!(
                "pool of {} tiles is too small",
                pool.len()
            )));
        }
        let mut rng = self.rng()?;
        let mut ids: Vec<TileId> = pool.iter().map(|t| t.id).collect();
        ids.shuffle(&mut *rng);
        ids.truncate(HAND_SIZE);
        Ok(ids)
    }

    fn choose_discard(&self, view: &OpponentView) -> Result<TileId, OpponentError> {
        let mut rng = self.rng()?;
        view.reserve
            .choose(&mut *rng)
            .map(|t| t.id)
            .ok_or_else(|| OpponentError::InvalidMove("reserve is empty".into()))
    }
}
