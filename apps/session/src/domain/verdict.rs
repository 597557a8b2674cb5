//! Oracle-facing value types: what the core asks and what it gets back.

use serde::{Deserialize, Serialize};

use crate::domain::rules::HAND_SIZE;
use crate::domain::tiles_types::TileKind;
use crate::errors::domain::{DomainError, ValidationKind};

/// A ron check: does `winning_tile` complete `hand`?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinQuery {
    pub hand: Vec<TileKind>,
    pub winning_tile: TileKind,
    pub dora_indicator: TileKind,
}

impl WinQuery {
    pub fn new(
        hand: Vec<TileKind>,
        winning_tile: TileKind,
        dora_indicator: TileKind,
    ) -> Result<Self, DomainError> {
        if hand.len() != HAND_SIZE {
            return Err(DomainError::validation(
                ValidationKind::HandSizeMismatch,
                format!("win check needs {HAND_SIZE} tiles, got {}", hand.len()),
            ));
        }
        Ok(Self {
            hand,
            winning_tile,
            dora_indicator,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinVerdict {
    pub is_winning: bool,
    pub yaku: Vec<String>,
    pub han: u32,
    pub fu: Option<u32>,
}

impl WinVerdict {
    pub fn no_win() -> Self {
        Self {
            is_winning: false,
            yaku: Vec::new(),
            han: 0,
            fu: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingTile {
    pub tile: TileKind,
    pub yaku: Vec<String>,
}

/// A 13-tile tenpai subset proposed from a 34-tile pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenpaiPattern {
    pub tiles: Vec<TileKind>,
    pub waiting_tiles: Vec<WaitingTile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenpaiVerdict {
    pub is_tenpai: bool,
    pub waiting_tiles: Vec<TileKind>,
}
