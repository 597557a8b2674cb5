use serde::{Deserialize, Serialize};

use crate::domain::rules::{points_for_han, MATCH_POINT_TARGET};
use crate::domain::state::{
    FinishedRound, MatchSession, Phase, RoundBoard, RoundIntent, RoundSetup, Side, WinningInfo,
};
use crate::domain::tiles_types::TileKind;
use crate::domain::verdict::WinVerdict;
use crate::errors::domain::DomainError;

/// Running match score. Only ever increases within a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn add(&mut self, side: Side, points: u32) {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot = slot.saturating_add(points);
    }

    pub fn is_match_over(&self) -> bool {
        self.player >= MATCH_POINT_TARGET || self.opponent >= MATCH_POINT_TARGET
    }

    /// Side that reached the target, if any.
    pub fn leader_at_target(&self) -> Option<Side> {
        match (
            self.player >= MATCH_POINT_TARGET,
            self.opponent >= MATCH_POINT_TARGET,
        ) {
            (true, _) => Some(Side::Player),
            (false, true) => Some(Side::Opponent),
            (false, false) => None,
        }
    }
}

impl MatchSession {
    pub fn is_match_over(&self) -> bool {
        self.score.is_match_over()
    }

    /// Credit `winner` and end the round.
    pub(crate) fn apply_win(
        &mut self,
        board: RoundBoard,
        winner: Side,
        winning_tile: TileKind,
        verdict: WinVerdict,
    ) -> WinningInfo {
        let points = points_for_han(verdict.han);
        self.score.add(winner, points);
        let winning = WinningInfo {
            winner,
            winning_tile,
            yaku: verdict.yaku,
            han: verdict.han,
            fu: verdict.fu,
            points,
        };
        self.phase = Phase::Finished(FinishedRound {
            board,
            winning: winning.clone(),
        });
        winning
    }

    /// After a win or draw: `None` when the match is over and the session went
    /// back to the title screen, otherwise the next round's deal.
    pub fn advance_round(&mut self) -> Result<Option<RoundSetup>, DomainError> {
        match self.phase {
            Phase::Finished(_) | Phase::Draw(_) => {}
            _ => {
                self.ensure_idle()?;
                return Err(self.mismatch("finished or draw"));
            }
        }
        if self.is_match_over() {
            self.return_to_title();
            return Ok(None);
        }
        self.prepare_round(RoundIntent::Advance).map(Some)
    }
}
