//! What the simulated opponent can see when it acts.
//!
//! Handed to [`crate::opponent::OpponentStrategy`] implementations. The
//! opponent never sees the player's hand or pool, only discards.

use crate::domain::hand_shape::winning_kinds;
use crate::domain::state::{MatchSession, Phase};
use crate::domain::tiles_types::{Tile, TileId, TileKind};

/// View used when choosing a discard.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentView {
    pub round: u32,
    pub dora_indicator: TileKind,
    /// The opponent's fixed 13-tile hand.
    pub hand: Vec<TileKind>,
    /// Tiles it may discard, in deal order.
    pub reserve: Vec<Tile>,
    pub own_discards: Vec<TileKind>,
    pub player_discards: Vec<TileKind>,
}

impl OpponentView {
    /// Kinds that would complete the opponent's hand.
    pub fn waits(&self) -> Vec<TileKind> {
        winning_kinds(&self.hand)
    }

    pub fn holds(&self, id: TileId) -> bool {
        self.reserve.iter().any(|t| t.id == id)
    }

    pub fn first_reserve(&self) -> Option<TileId> {
        self.reserve.first().map(|t| t.id)
    }
}

impl MatchSession {
    /// `None` unless a round is in play.
    pub fn opponent_view(&self) -> Option<OpponentView> {
        let Phase::Playing(play) = self.phase() else {
            return None;
        };
        let board = &play.board;
        Some(OpponentView {
            round: self.round(),
            dora_indicator: self.dora_indicator()?,
            hand: board.opponent.hand_kinds(),
            reserve: board.opponent.reserve.clone(),
            own_discards: board.opponent.discards.iter().map(|t| t.kind).collect(),
            player_discards: board.player_discards.iter().map(|t| t.kind).collect(),
        })
    }
}
