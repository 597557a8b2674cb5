use super::MatchService;
use crate::domain::{SessionSnapshot, TileId, ZoneName};
use crate::error::AppError;

impl MatchService {
    /// Drag a tile between (or within) the hand and the pool while selecting.
    pub fn move_tile(
        &self,
        id: TileId,
        from: ZoneName,
        to: ZoneName,
        at: Option<usize>,
    ) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate("move_tile", |s| s.move_tile(id, from, to, at))?;
        Ok(snap)
    }

    /// Out-of-range or same-index reorders succeed without changing anything.
    pub fn reorder_zone(
        &self,
        zone: ZoneName,
        from: usize,
        to: usize,
    ) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate("reorder_zone", |s| s.reorder_zone(zone, from, to))?;
        Ok(snap)
    }

    pub fn reset_selection(&self) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate("reset_selection", |s| s.reset_selection())?;
        Ok(snap)
    }

    pub fn sort_zone(&self, zone: ZoneName) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate("sort_zone", |s| s.sort_zone(zone))?;
        Ok(snap)
    }
}
