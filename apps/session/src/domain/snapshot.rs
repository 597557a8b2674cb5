//! Public snapshot API for observing a session without exposing internals.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::rules::HAND_SIZE;
use crate::domain::scoring::Score;
use crate::domain::state::{MatchSession, Phase, RoundBoard, SessionFault, Side, WinningInfo};
use crate::domain::tiles_logic::dora_from_indicator;
use crate::domain::tiles_types::{Tile, TileKind};

/// Header fields plus phase-specific data and derived guard flags.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub round: u32,
    /// Dora indicator revealed at deal time.
    pub dora: Option<TileKind>,
    /// Kind that actually scores as dora.
    pub dora_bonus: Option<TileKind>,
    pub score: Score,
    pub is_awaiting_oracle: bool,
    pub is_busy: bool,
    pub can_confirm: bool,
    pub can_discard: bool,
    pub is_match_over: bool,
    pub last_error: Option<SessionFault>,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", content = "data", rename_all = "lowercase")]
pub enum PhaseSnapshot {
    Title,
    Selecting(SelectingSnapshot),
    Playing(PlayingSnapshot),
    Finished(FinishedSnapshot),
    Draw(DrawSnapshot),
}

impl PhaseSnapshot {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseSnapshot::Title => "title",
            PhaseSnapshot::Selecting(_) => "selecting",
            PhaseSnapshot::Playing(_) => "playing",
            PhaseSnapshot::Finished(_) => "finished",
            PhaseSnapshot::Draw(_) => "draw",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectingSnapshot {
    pub hand: Vec<Tile>,
    pub pool: Vec<Tile>,
    pub hand_capacity: usize,
    pub opponent_hand_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardView {
    pub side: Side,
    pub tile: Tile,
}

/// Player-visible tiles shared by every in-round phase.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePublic {
    pub hand: Vec<Tile>,
    pub pool: Vec<Tile>,
    pub player_discards: Vec<Tile>,
    pub opponent_discards: Vec<Tile>,
    pub last_discard: Option<DiscardView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayingSnapshot {
    pub table: TablePublic,
    pub turn: Side,
    pub opponent_hand_count: usize,
    pub opponent_reserve_count: usize,
}

/// Round won; the opponent's hand is revealed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedSnapshot {
    pub table: TablePublic,
    pub opponent_hand: Vec<Tile>,
    pub winning: WinningInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSnapshot {
    pub table: TablePublic,
    pub opponent_hand: Vec<Tile>,
}

pub fn snapshot(session: &MatchSession) -> SessionSnapshot {
    let phase = match session.phase() {
        Phase::Title => PhaseSnapshot::Title,
        Phase::Selecting(board) => PhaseSnapshot::Selecting(SelectingSnapshot {
            hand: board.zones.hand().to_vec(),
            pool: board.zones.pool().to_vec(),
            hand_capacity: HAND_SIZE,
            opponent_hand_count: board.opponent.hand.len(),
        }),
        Phase::Playing(play) => PhaseSnapshot::Playing(PlayingSnapshot {
            table: build_table(&play.board),
            turn: play.turn,
            opponent_hand_count: play.board.opponent.hand.len(),
            opponent_reserve_count: play.board.opponent.reserve.len(),
        }),
        Phase::Finished(done) => PhaseSnapshot::Finished(FinishedSnapshot {
            table: build_table(&done.board),
            opponent_hand: done.board.opponent.hand.clone(),
            winning: done.winning.clone(),
        }),
        Phase::Draw(board) => PhaseSnapshot::Draw(DrawSnapshot {
            table: build_table(board),
            opponent_hand: board.opponent.hand.clone(),
        }),
    };

    SessionSnapshot {
        session_id: session.session_id(),
        round: session.round(),
        dora: session.dora_indicator(),
        dora_bonus: session.dora_indicator().map(dora_from_indicator),
        score: session.score(),
        is_awaiting_oracle: session.is_awaiting_oracle(),
        is_busy: session.is_busy(),
        can_confirm: session.can_confirm(),
        can_discard: session.can_discard(),
        is_match_over: session.is_match_over(),
        last_error: session.last_error().cloned(),
        phase,
    }
}

fn build_table(board: &RoundBoard) -> TablePublic {
    TablePublic {
        hand: board.zones.hand().to_vec(),
        pool: board.zones.pool().to_vec(),
        player_discards: board.player_discards.clone(),
        opponent_discards: board.opponent.discards.clone(),
        last_discard: board
            .last_discard()
            .map(|&(side, tile)| DiscardView { side, tile }),
    }
}
