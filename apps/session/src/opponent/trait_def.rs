//! Opponent strategy trait definition.

use std::fmt;

use crate::domain::{OpponentView, Tile, TileId, TileKind};
use crate::error::AppError;

/// Errors that can occur while the opponent decides.
#[derive(Debug, Clone, PartialEq)]
pub enum OpponentError {
    /// Strategy hit an internal problem (poisoned RNG, empty input)
    Internal(String),
    /// Strategy produced a choice the rules do not allow
    InvalidMove(String),
}

impl fmt::Display for OpponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentError::Internal(msg) => write!(f, "opponent internal error: {msg}"),
            OpponentError::InvalidMove(msg) => write!(f, "opponent invalid move: {msg}"),
        }
    }
}

impl std::error::Error for OpponentError {}

impl From<OpponentError> for AppError {
    fn from(err: OpponentError) -> Self {
        AppError::internal(format!("Opponent error: {err}"))
    }
}

/// Decision-making for the simulated side.
///
/// Called synchronously by the match service; implementations must not block.
pub trait OpponentStrategy: Send + Sync {
    /// Pick the 13 hand tiles from the opponent's 34-tile pool.
    fn choose_hand(&self, pool: &[Tile], dora_indicator: TileKind)
        -> Result<Vec<TileId>, OpponentError>;

    /// Pick a reserve tile to discard.
    fn choose_discard(&self, view: &OpponentView) -> Result<TileId, OpponentError>;
}
