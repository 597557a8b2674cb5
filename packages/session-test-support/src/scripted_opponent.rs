//! Predictable opponent: keeps the first 13 tiles of its pool and always
//! discards the first reserve tile.

use mahjong_session::domain::{OpponentView, Tile};
use mahjong_session::opponent::OpponentError;
use mahjong_session::{OpponentStrategy, TileId, TileKind};

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstTilesOpponent;

impl OpponentStrategy for FirstTilesOpponent {
    fn choose_hand(&self, pool: &[Tile], _dora: TileKind) -> Result<Vec<TileId>, OpponentError> {
        Ok(pool.iter().take(13).map(|t| t.id).collect())
    }

    fn choose_discard(&self, view: &OpponentView) -> Result<TileId, OpponentError> {
        view.first_reserve()
            .ok_or_else(|| OpponentError::InvalidMove("reserve is empty".into()))
    }
}

/// Fails every decision; exercises the service's fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrokenOpponent;

impl OpponentStrategy for BrokenOpponent {
    fn choose_hand(&self, _pool: &[Tile], _dora: TileKind) -> Result<Vec<TileId>, OpponentError> {
        Err(OpponentError::Internal("no hand today".into()))
    }

    fn choose_discard(&self, _view: &OpponentView) -> Result<TileId, OpponentError> {
        Err(OpponentError::Internal("no discard today".into()))
    }
}

/// Keeps the first 13 tiles like [`FirstTilesOpponent`] but fails every
/// discard.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardlessOpponent;

impl OpponentStrategy for DiscardlessOpponent {
    fn choose_hand(&self, pool: &[Tile], dora: TileKind) -> Result<Vec<TileId>, OpponentError> {
        FirstTilesOpponent.choose_hand(pool, dora)
    }

    fn choose_discard(&self, _view: &OpponentView) -> Result<TileId, OpponentError> {
        Err(OpponentError::Internal("no discard today".into()))
    }
}
