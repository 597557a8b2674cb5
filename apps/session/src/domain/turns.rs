//! Turn controller: confirm, discards and the checks between them.
//!
//! Every step that has to wait for the oracle or the opponent's delay issues
//! a [`PendingCheck`]; its result is fed back with the matching ticket.

use std::mem;

use crate::domain::rules::HAND_SIZE;
use crate::domain::state::{
    phase_mismatch, MatchSession, PendingCheck, PendingKind, Phase, PlayingRound, Resolution, Side,
    Ticket,
};
use crate::domain::tiles_types::{TileId, TileKind};
use crate::domain::verdict::{TenpaiVerdict, WinQuery, WinVerdict};
use crate::errors::domain::{DomainError, ValidationKind};

fn out_of_turn(expected: Side) -> DomainError {
    DomainError::validation(
        ValidationKind::OutOfTurn,
        format!("it is not the {expected:?} turn"),
    )
}

impl MatchSession {
    /// Lock in the 13-tile hand. With `require_tenpai` a gate check is
    /// returned instead of starting play immediately.
    pub fn begin_confirm(&mut self, require_tenpai: bool) -> Result<Option<PendingCheck>, DomainError> {
        self.ensure_idle()?;
        let Phase::Selecting(board) = self.phase() else {
            return Err(self.mismatch("selecting"));
        };
        let held = board.zones.hand().len();
        if held != HAND_SIZE {
            return Err(DomainError::validation(
                ValidationKind::HandSizeMismatch,
                format!("hand holds {held} tiles, need {HAND_SIZE}"),
            ));
        }
        self.clear_fault();
        if require_tenpai {
            return Ok(Some(self.issue(PendingKind::TenpaiGate)));
        }
        self.start_play();
        Ok(None)
    }

    /// Hand kinds for the tenpai gate while selecting.
    pub fn selected_hand(&self) -> Option<Vec<TileKind>> {
        match self.phase() {
            Phase::Selecting(b) => Some(b.zones.hand_kinds()),
            _ => None,
        }
    }

    /// Oracle trouble never blocks confirmation; only a definite "not tenpai" does.
    pub fn resolve_tenpai_gate(
        &mut self,
        ticket: Ticket,
        result: Result<TenpaiVerdict, DomainError>,
    ) -> Result<Resolution, DomainError> {
        let Some(check) = self.claim(ticket) else {
            return Ok(Resolution::Stale);
        };
        if check.kind != PendingKind::TenpaiGate {
            self.pending = Some(check);
            return Ok(Resolution::Stale);
        }
        match result {
            Ok(v) if v.is_tenpai => {
                self.start_play();
                Ok(Resolution::Applied)
            }
            Ok(_) => Err(DomainError::validation(
                ValidationKind::NotTenpai,
                "selected hand is not one tile from a win",
            )),
            Err(e) => {
                self.record_fault(&e);
                self.start_play();
                Ok(Resolution::Applied)
            }
        }
    }

    fn start_play(&mut self) {
        self.phase = match mem::replace(&mut self.phase, Phase::Title) {
            Phase::Selecting(board) => Phase::Playing(PlayingRound {
                board,
                turn: Side::Player,
            }),
            other => other,
        };
    }

    fn enter_draw(&mut self) {
        self.phase = match mem::replace(&mut self.phase, Phase::Title) {
            Phase::Playing(play) => Phase::Draw(play.board),
            other => other,
        };
    }

    /// Player discards `id` from the pool. The turn passes to the opponent and
    /// the opponent-ron check is returned.
    pub fn begin_player_discard(&mut self, id: TileId) -> Result<PendingCheck, DomainError> {
        self.ensure_idle()?;
        let current = self.phase.name();
        let Phase::Playing(play) = &mut self.phase else {
            return Err(phase_mismatch(current, "playing"));
        };
        if play.turn != Side::Player {
            return Err(out_of_turn(Side::Player));
        }
        let tile = play.board.zones.take_from_pool(id)?;
        play.board.player_discards.push(tile);
        play.board.discard_log.push((Side::Player, tile));
        play.turn = Side::Opponent;
        self.clear_fault();
        Ok(self.issue(PendingKind::OpponentRon { tile }))
    }

    /// The oracle question behind a ron check.
    pub fn win_query(&self, check: &PendingCheck) -> Result<WinQuery, DomainError> {
        let board = self
            .phase()
            .board()
            .ok_or_else(|| DomainError::invariant("win check without a board"))?;
        let dora = self
            .dora_indicator()
            .ok_or_else(|| DomainError::invariant("win check without a dora indicator"))?;
        match &check.kind {
            PendingKind::OpponentRon { tile } => {
                WinQuery::new(board.opponent.hand_kinds(), tile.kind, dora)
            }
            PendingKind::PlayerRon { tile } => WinQuery::new(board.zones.hand_kinds(), tile.kind, dora),
            other => Err(DomainError::invariant(format!("{other:?} is not a win check"))),
        }
    }

    pub fn resolve_opponent_ron(
        &mut self,
        ticket: Ticket,
        result: Result<WinVerdict, DomainError>,
    ) -> Resolution {
        self.resolve_ron(ticket, Side::Opponent, result)
    }

    /// A non-winning result with the player's pool exhausted ends the round as a draw.
    pub fn resolve_player_ron(
        &mut self,
        ticket: Ticket,
        result: Result<WinVerdict, DomainError>,
    ) -> Resolution {
        self.resolve_ron(ticket, Side::Player, result)
    }

    fn resolve_ron(
        &mut self,
        ticket: Ticket,
        claimant: Side,
        result: Result<WinVerdict, DomainError>,
    ) -> Resolution {
        let Some(check) = self.claim(ticket) else {
            return Resolution::Stale;
        };
        let tile = match (&check.kind, claimant) {
            (PendingKind::OpponentRon { tile }, Side::Opponent)
            | (PendingKind::PlayerRon { tile }, Side::Player) => *tile,
            _ => {
                self.pending = Some(check);
                return Resolution::Stale;
            }
        };

        let verdict = match result {
            Ok(v) => v,
            Err(e) => {
                // Inconclusive: treated as a non-win so play continues.
                self.record_fault(&e);
                WinVerdict::no_win()
            }
        };

        if verdict.is_winning {
            match mem::replace(&mut self.phase, Phase::Title) {
                Phase::Playing(play) => {
                    self.apply_win(play.board, claimant, tile.kind, verdict);
                }
                other => self.phase = other,
            }
            return Resolution::Applied;
        }

        let pool_empty = matches!(
            self.phase(),
            Phase::Playing(p) if p.board.zones.pool().is_empty()
        );
        if claimant == Side::Player && pool_empty {
            self.enter_draw();
        }
        Resolution::Applied
    }

    /// Start the opponent's turn: a draw if its reserve is exhausted,
    /// otherwise the thinking delay.
    pub fn begin_opponent_turn(&mut self) -> Result<Option<PendingCheck>, DomainError> {
        self.ensure_idle()?;
        let Phase::Playing(play) = self.phase() else {
            return Err(self.mismatch("playing"));
        };
        if play.turn != Side::Opponent {
            return Err(out_of_turn(Side::Opponent));
        }
        if play.board.opponent.reserve.is_empty() {
            self.enter_draw();
            return Ok(None);
        }
        Ok(Some(self.issue(PendingKind::OpponentThinking)))
    }

    /// Opponent discards `id` from its reserve once thinking is over. The turn
    /// passes back to the player and the player-ron check follows.
    ///
    /// An id outside the reserve is rejected and the thinking check stays
    /// outstanding so the caller can retry with another tile.
    pub fn apply_opponent_discard(
        &mut self,
        ticket: Ticket,
        id: TileId,
    ) -> Result<Resolution, DomainError> {
        match self.pending() {
            Some(p) if p.ticket == ticket && p.kind == PendingKind::OpponentThinking => {}
            _ => return Ok(Resolution::Stale),
        }
        let current = self.phase.name();
        let Phase::Playing(play) = &mut self.phase else {
            return Err(DomainError::invariant(format!(
                "opponent thinking while session is in {current}"
            )));
        };
        let idx = play
            .board
            .opponent
            .reserve
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::TileNotInZone,
                    format!("{id} is not in the opponent's reserve"),
                )
            })?;
        let tile = play.board.opponent.reserve.remove(idx);
        play.board.opponent.discards.push(tile);
        play.board.discard_log.push((Side::Opponent, tile));
        play.turn = Side::Player;
        self.pending = None;
        Ok(Resolution::Next(self.issue(PendingKind::PlayerRon { tile })))
    }
}
