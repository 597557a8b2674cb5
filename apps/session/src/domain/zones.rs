//! Player-side zone manager: the ordered `hand` and `pool` containers.
//!
//! Every tile id lives in exactly one zone. Operations are total: a rejected
//! request leaves both zones untouched and reports a validation error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::rules::HAND_SIZE;
use crate::domain::tiles_logic::sort_by_kind;
use crate::domain::tiles_types::{Tile, TileId, TileKind};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneName {
    Hand,
    Pool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zones {
    hand: Vec<Tile>,
    pool: Vec<Tile>,
}

impl Zones {
    /// Fresh zones for a new deal: everything starts in the pool.
    pub fn new(pool: Vec<Tile>) -> Self {
        Self {
            hand: Vec::with_capacity(HAND_SIZE),
            pool,
        }
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn pool(&self) -> &[Tile] {
        &self.pool
    }

    pub fn zone(&self, zone: ZoneName) -> &[Tile] {
        match zone {
            ZoneName::Hand => &self.hand,
            ZoneName::Pool => &self.pool,
        }
    }

    fn zone_mut(&mut self, zone: ZoneName) -> &mut Vec<Tile> {
        match zone {
            ZoneName::Hand => &mut self.hand,
            ZoneName::Pool => &mut self.pool,
        }
    }

    pub fn hand_kinds(&self) -> Vec<TileKind> {
        self.hand.iter().map(|t| t.kind).collect()
    }

    pub fn pool_kinds(&self) -> Vec<TileKind> {
        self.pool.iter().map(|t| t.kind).collect()
    }

    pub fn position(&self, zone: ZoneName, id: TileId) -> Option<usize> {
        self.zone(zone).iter().position(|t| t.id == id)
    }

    /// Which zone currently holds `id`, if any.
    pub fn locate(&self, id: TileId) -> Option<ZoneName> {
        [ZoneName::Hand, ZoneName::Pool]
            .into_iter()
            .find(|&z| self.position(z, id).is_some())
    }

    pub fn hand_is_full(&self) -> bool {
        self.hand.len() >= HAND_SIZE
    }

    /// Relocate `id` from `from` to `to`, inserting at `at` (past the end or
    /// `None` appends). With `from == to` the tile is repositioned in place.
    pub fn move_tile(
        &mut self,
        id: TileId,
        from: ZoneName,
        to: ZoneName,
        at: Option<usize>,
    ) -> Result<(), DomainError> {
        let idx = self.position(from, id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::TileNotInZone,
                format!("{id} is not in {from:?}"),
            )
        })?;
        if to == ZoneName::Hand && from != ZoneName::Hand && self.hand_is_full() {
            return Err(DomainError::validation(
                ValidationKind::HandFull,
                format!("hand already holds {HAND_SIZE} tiles"),
            ));
        }

        let tile = self.zone_mut(from).remove(idx);
        let dest = self.zone_mut(to);
        let at = at.unwrap_or(dest.len()).min(dest.len());
        dest.insert(at, tile);
        Ok(())
    }

    /// Move the element at `from` to `to` within one zone. Returns whether
    /// anything changed; out-of-range or equal indices are a no-op.
    pub fn reorder_zone(&mut self, zone: ZoneName, from: usize, to: usize) -> bool {
        let tiles = self.zone_mut(zone);
        if from == to || from >= tiles.len() || to >= tiles.len() {
            return false;
        }
        let tile = tiles.remove(from);
        tiles.insert(to, tile);
        true
    }

    /// Selection reset: every hand tile goes back to the end of the pool.
    pub fn return_hand_to_pool(&mut self) {
        let hand = std::mem::take(&mut self.hand);
        self.pool.extend(hand);
    }

    pub fn sort_zone(&mut self, zone: ZoneName) {
        sort_by_kind(self.zone_mut(zone));
    }

    /// Remove `id` from the pool for a discard.
    pub fn take_from_pool(&mut self, id: TileId) -> Result<Tile, DomainError> {
        let idx = self.position(ZoneName::Pool, id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::TileNotInZone,
                format!("{id} is not in the pool"),
            )
        })?;
        Ok(self.pool.remove(idx))
    }

    /// `|hand| + |pool| == expected`, hand within capacity, no duplicate ids.
    pub fn check_conservation(&self, expected: usize) -> Result<(), DomainError> {
        if self.hand.len() > HAND_SIZE {
            return Err(DomainError::invariant(format!(
                "hand holds {} tiles",
                self.hand.len()
            )));
        }
        let total = ensure_distinct(self.hand.iter().chain(self.pool.iter()))?;
        if total != expected {
            return Err(DomainError::invariant(format!(
                "zones hold {total} tiles, expected {expected}"
            )));
        }
        Ok(())
    }
}

/// Count the tiles, failing if any id appears twice.
pub fn ensure_distinct<'a, I>(tiles: I) -> Result<usize, DomainError>
where
    I: IntoIterator<Item = &'a Tile>,
{
    let mut seen = HashSet::new();
    for t in tiles {
        if !seen.insert(t.id) {
            return Err(DomainError::invariant(format!("duplicate {}", t.id)));
        }
    }
    Ok(seen.len())
}
