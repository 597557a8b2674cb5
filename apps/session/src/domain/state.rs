use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::deck::{deal, deal_from_kinds, Deal};
use crate::domain::rules::{HAND_SIZE, POOL_SIZE};
use crate::domain::scoring::Score;
use crate::domain::seed_derivation::{derive_dealing_seed, derive_opponent_seed};
use crate::domain::tiles_types::{Tile, TileId, TileIdGen, TileKind};
use crate::domain::zones::{ensure_distinct, ZoneName, Zones};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// The simulated opponent's allocation. Hand and reserve stay hidden from the
/// rendering layer until the round ends.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentSeat {
    /// Fixed 13-tile hand the opponent is waiting on.
    pub hand: Vec<Tile>,
    /// Remaining tiles it discards from.
    pub reserve: Vec<Tile>,
    pub discards: Vec<Tile>,
}

impl OpponentSeat {
    /// Split a dealt pool into the chosen hand and the reserve.
    pub fn from_pool(pool: Vec<Tile>, hand_ids: &[TileId]) -> Result<Self, DomainError> {
        if hand_ids.len() != HAND_SIZE {
            return Err(DomainError::validation(
                ValidationKind::HandSizeMismatch,
                format!("opponent chose {} tiles", hand_ids.len()),
            ));
        }
        let (hand, reserve): (Vec<Tile>, Vec<Tile>) =
            pool.into_iter().partition(|t| hand_ids.contains(&t.id));
        if hand.len() != HAND_SIZE {
            return Err(DomainError::validation(
                ValidationKind::TileNotInZone,
                "opponent hand names tiles outside its pool",
            ));
        }
        Ok(Self {
            hand,
            reserve,
            discards: Vec::new(),
        })
    }

    pub fn hand_kinds(&self) -> Vec<TileKind> {
        self.hand.iter().map(|t| t.kind).collect()
    }
}

/// Everything dealt for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundBoard {
    pub zones: Zones,
    pub player_discards: Vec<Tile>,
    pub opponent: OpponentSeat,
    /// Every discard of the round in play order.
    pub discard_log: Vec<(Side, Tile)>,
}

impl RoundBoard {
    pub fn new(pool: Vec<Tile>, opponent: OpponentSeat) -> Self {
        Self {
            zones: Zones::new(pool),
            player_discards: Vec::new(),
            opponent,
            discard_log: Vec::new(),
        }
    }

    pub fn discards(&self, side: Side) -> &[Tile] {
        match side {
            Side::Player => &self.player_discards,
            Side::Opponent => &self.opponent.discards,
        }
    }

    pub fn last_discard(&self) -> Option<&(Side, Tile)> {
        self.discard_log.last()
    }

    /// Tile conservation across both sides.
    pub fn check_conservation(&self) -> Result<(), DomainError> {
        let player_side = self.zones.hand().len()
            + self.zones.pool().len()
            + self.player_discards.len();
        let opp = &self.opponent;
        let opponent_side = opp.hand.len() + opp.reserve.len() + opp.discards.len();
        if player_side != POOL_SIZE || opponent_side != POOL_SIZE {
            return Err(DomainError::invariant(format!(
                "tile counts {player_side}/{opponent_side}, expected {POOL_SIZE} each"
            )));
        }
        if opp.hand.len() != HAND_SIZE {
            return Err(DomainError::invariant(format!(
                "opponent hand holds {} tiles",
                opp.hand.len()
            )));
        }
        if self.discard_log.len() != self.player_discards.len() + opp.discards.len() {
            return Err(DomainError::invariant("discard log out of step with piles"));
        }
        ensure_distinct(
            self.zones
                .hand()
                .iter()
                .chain(self.zones.pool())
                .chain(&self.player_discards)
                .chain(&opp.hand)
                .chain(&opp.reserve)
                .chain(&opp.discards),
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayingRound {
    pub board: RoundBoard,
    pub turn: Side,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRound {
    pub board: RoundBoard,
    pub winning: WinningInfo,
}

/// Phases of a match, each carrying only what is valid in it.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Title,
    Selecting(RoundBoard),
    Playing(PlayingRound),
    Finished(FinishedRound),
    Draw(RoundBoard),
}

impl Phase {
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::Selecting(_) => "selecting",
            Phase::Playing(_) => "playing",
            Phase::Finished(_) => "finished",
            Phase::Draw(_) => "draw",
        }
    }

    pub fn board(&self) -> Option<&RoundBoard> {
        match self {
            Phase::Title => None,
            Phase::Selecting(b) | Phase::Draw(b) => Some(b),
            Phase::Playing(p) => Some(&p.board),
            Phase::Finished(f) => Some(&f.board),
        }
    }

    pub fn turn(&self) -> Option<Side> {
        match self {
            Phase::Playing(p) => Some(p.turn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningInfo {
    pub winner: Side,
    pub winning_tile: TileKind,
    pub yaku: Vec<String>,
    pub han: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fu: Option<u32>,
    /// Points added to the winner's score.
    pub points: u32,
}

/// Recoverable problem shown to the user as a banner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionFault {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&DomainError> for SessionFault {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code(),
            message: err.detail().to_string(),
        }
    }
}

/// Identifies one outstanding suspension. Results carrying any other ticket
/// are discarded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ticket {
    pub epoch: u64,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingKind {
    /// Oracle tenpai check before play starts.
    TenpaiGate,
    /// Simulated thinking delay before the opponent discards.
    OpponentThinking,
    /// Does the player's discard complete the opponent's hand?
    OpponentRon { tile: Tile },
    /// Does the opponent's discard complete the player's hand?
    PlayerRon { tile: Tile },
}

impl PendingKind {
    pub const fn awaits_oracle(&self) -> bool {
        !matches!(self, PendingKind::OpponentThinking)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCheck {
    pub ticket: Ticket,
    pub kind: PendingKind,
}

/// Outcome of feeding a suspension result back into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Applied; nothing else outstanding.
    Applied,
    /// Applied, and a follow-up check is now outstanding.
    Next(PendingCheck),
    /// Ticket did not match; session untouched.
    Stale,
}

/// Why a new deal is being prepared.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoundIntent {
    StartMatch,
    Redeal,
    Advance,
    /// Re-deal of the current round after an invariant violation.
    Recover,
}

/// A validated deal waiting for the opponent to pick its hand.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSetup {
    pub intent: RoundIntent,
    pub round: u32,
    pub redeal: u32,
    pub deal: Deal,
    /// Seed for the opponent strategy playing this deal.
    pub opponent_seed: u64,
}

pub(crate) fn phase_mismatch(current: &str, wanted: &str) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("expected {wanted}, session is in {current}"),
    )
}

/// Aggregate root for one practice match.
#[derive(Debug, Clone)]
pub struct MatchSession {
    session_id: Uuid,
    match_seed: u64,
    /// Matches started in this session; varies deals between matches.
    match_no: u32,
    epoch: u64,
    seq: u64,
    round: u32,
    redeal: u32,
    dora_indicator: Option<TileKind>,
    pub(crate) score: Score,
    pub(crate) phase: Phase,
    pub(crate) pending: Option<PendingCheck>,
    pub(crate) last_error: Option<SessionFault>,
    ids: TileIdGen,
}

impl MatchSession {
    pub fn new(match_seed: u64) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            match_seed,
            match_no: 0,
            epoch: 0,
            seq: 0,
            round: 0,
            redeal: 0,
            dora_indicator: None,
            score: Score::default(),
            phase: Phase::Title,
            pending: None,
            last_error: None,
            ids: TileIdGen::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn match_seed(&self) -> u64 {
        self.match_seed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 1-based round number; 0 on the title screen.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn dora_indicator(&self) -> Option<TileKind> {
        self.dora_indicator
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn pending(&self) -> Option<&PendingCheck> {
        self.pending.as_ref()
    }

    pub fn last_error(&self) -> Option<&SessionFault> {
        self.last_error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_awaiting_oracle(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.kind.awaits_oracle())
    }

    pub fn can_confirm(&self) -> bool {
        !self.is_busy()
            && matches!(&self.phase, Phase::Selecting(b) if b.zones.hand().len() == HAND_SIZE)
    }

    pub fn can_discard(&self) -> bool {
        !self.is_busy() && self.phase.turn() == Some(Side::Player)
    }

    pub fn record_fault(&mut self, err: &DomainError) {
        self.last_error = Some(SessionFault::from(err));
    }

    pub(crate) fn clear_fault(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn issue(&mut self, kind: PendingKind) -> PendingCheck {
        self.seq += 1;
        let check = PendingCheck {
            ticket: Ticket {
                epoch: self.epoch,
                seq: self.seq,
            },
            kind,
        };
        self.pending = Some(check.clone());
        check
    }

    /// Take the outstanding check if `ticket` names it.
    pub(crate) fn claim(&mut self, ticket: Ticket) -> Option<PendingCheck> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }

    /// Invalidate every outstanding ticket.
    pub(crate) fn bump_epoch(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), DomainError> {
        if self.is_busy() {
            return Err(DomainError::validation(
                ValidationKind::Busy,
                "a check is still outstanding",
            ));
        }
        Ok(())
    }

    pub(crate) fn mismatch(&self, wanted: &str) -> DomainError {
        phase_mismatch(self.phase.name(), wanted)
    }

    fn selecting_board_mut(&mut self) -> Result<&mut RoundBoard, DomainError> {
        let current = self.phase.name();
        match &mut self.phase {
            Phase::Selecting(b) => Ok(b),
            _ => Err(phase_mismatch(current, "selecting")),
        }
    }

    fn base_seed(&self, match_no: u32) -> u64 {
        self.match_seed
            .wrapping_add(u64::from(match_no).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Dealing and opponent seeds for a deal made for `intent`.
    fn seeds_for(&self, intent: RoundIntent, round: u32, redeal: u32) -> (u64, u64) {
        let match_no = if intent == RoundIntent::StartMatch {
            self.match_no + 1
        } else {
            self.match_no
        };
        let base = self.base_seed(match_no);
        (
            derive_dealing_seed(base, round, redeal),
            derive_opponent_seed(base, round).wrapping_add(u64::from(redeal)),
        )
    }

    /// Validate that a new deal may be made for `intent` and work out which
    /// round/redeal it belongs to.
    fn plan_round(&self, intent: RoundIntent) -> Result<(u32, u32), DomainError> {
        if intent != RoundIntent::Recover {
            self.ensure_idle()?;
        }
        match intent {
            RoundIntent::StartMatch => match self.phase {
                Phase::Title => Ok((1, 0)),
                _ => Err(self.mismatch("title")),
            },
            RoundIntent::Redeal => match self.phase {
                Phase::Selecting(_) => Ok((self.round, self.redeal + 1)),
                _ => Err(self.mismatch("selecting")),
            },
            RoundIntent::Advance => match self.phase {
                Phase::Finished(_) | Phase::Draw(_) => Ok((self.round + 1, 0)),
                _ => Err(self.mismatch("finished or draw")),
            },
            RoundIntent::Recover => Ok((self.round.max(1), self.redeal + 1)),
        }
    }

    /// Shuffle and deal for `intent`. Only the tile id counter changes.
    pub fn prepare_round(&mut self, intent: RoundIntent) -> Result<RoundSetup, DomainError> {
        let (round, redeal) = self.plan_round(intent)?;
        let (dealing_seed, opponent_seed) = self.seeds_for(intent, round, redeal);
        let deal = deal(&mut self.ids, dealing_seed)?;
        Ok(RoundSetup {
            intent,
            round,
            redeal,
            deal,
            opponent_seed,
        })
    }

    /// Like [`prepare_round`](Self::prepare_round) but with fixed pools.
    pub fn prepare_fixed_round(
        &mut self,
        intent: RoundIntent,
        pool: &[TileKind],
        opponent_pool: &[TileKind],
        dora_indicator: TileKind,
    ) -> Result<RoundSetup, DomainError> {
        let (round, redeal) = self.plan_round(intent)?;
        let (_, opponent_seed) = self.seeds_for(intent, round, redeal);
        let deal = deal_from_kinds(&mut self.ids, pool, opponent_pool, dora_indicator)?;
        Ok(RoundSetup {
            intent,
            round,
            redeal,
            deal,
            opponent_seed,
        })
    }

    /// Install a prepared deal once the opponent has chosen its hand.
    pub fn install_round(
        &mut self,
        setup: RoundSetup,
        opponent_hand: &[TileId],
    ) -> Result<(), DomainError> {
        // The phase may have moved on while the opponent was choosing.
        self.plan_round(setup.intent)?;
        let RoundSetup {
            intent,
            round,
            redeal,
            deal,
            ..
        } = setup;
        let opponent = OpponentSeat::from_pool(deal.opponent_pool, opponent_hand)?;
        let board = RoundBoard::new(deal.pool, opponent);
        board.check_conservation()?;

        if intent == RoundIntent::StartMatch {
            self.match_no += 1;
            self.score = Score::default();
        }
        self.bump_epoch();
        self.round = round;
        self.redeal = redeal;
        self.dora_indicator = Some(deal.dora);
        self.last_error = None;
        self.phase = Phase::Selecting(board);
        Ok(())
    }

    /// Back to the title screen from anywhere; the match is discarded.
    pub fn return_to_title(&mut self) {
        self.bump_epoch();
        self.phase = Phase::Title;
        self.score = Score::default();
        self.round = 0;
        self.redeal = 0;
        self.dora_indicator = None;
        self.last_error = None;
    }

    // ---- selection-phase zone intents ----

    pub fn move_tile(
        &mut self,
        id: TileId,
        from: ZoneName,
        to: ZoneName,
        at: Option<usize>,
    ) -> Result<(), DomainError> {
        self.ensure_idle()?;
        self.selecting_board_mut()?.zones.move_tile(id, from, to, at)?;
        self.clear_fault();
        Ok(())
    }

    /// Reorder within a zone. Allowed while selecting and during play.
    pub fn reorder_zone(&mut self, zone: ZoneName, from: usize, to: usize) -> Result<bool, DomainError> {
        self.ensure_idle()?;
        let current = self.phase.name();
        let zones = match &mut self.phase {
            Phase::Selecting(b) => &mut b.zones,
            Phase::Playing(p) => &mut p.board.zones,
            _ => return Err(phase_mismatch(current, "selecting or playing")),
        };
        Ok(zones.reorder_zone(zone, from, to))
    }

    pub fn sort_zone(&mut self, zone: ZoneName) -> Result<(), DomainError> {
        self.ensure_idle()?;
        let current = self.phase.name();
        match &mut self.phase {
            Phase::Selecting(b) => b.zones.sort_zone(zone),
            Phase::Playing(p) => p.board.zones.sort_zone(zone),
            _ => return Err(phase_mismatch(current, "selecting or playing")),
        }
        Ok(())
    }

    pub fn reset_selection(&mut self) -> Result<(), DomainError> {
        self.ensure_idle()?;
        self.selecting_board_mut()?.zones.return_hand_to_pool();
        self.clear_fault();
        Ok(())
    }

    /// Whole-session invariant check: phase-specific tile conservation.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        match &self.phase {
            Phase::Title => Ok(()),
            Phase::Selecting(b) => {
                if !b.player_discards.is_empty() || !b.discard_log.is_empty() {
                    return Err(DomainError::invariant("discards before play started"));
                }
                b.zones.check_conservation(POOL_SIZE)?;
                b.check_conservation()
            }
            Phase::Playing(PlayingRound { board, .. })
            | Phase::Finished(FinishedRound { board, .. })
            | Phase::Draw(board) => {
                if board.zones.hand().len() != HAND_SIZE {
                    return Err(DomainError::invariant(format!(
                        "hand holds {} tiles during play",
                        board.zones.hand().len()
                    )));
                }
                board.check_conservation()
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> Option<&mut RoundBoard> {
        match &mut self.phase {
            Phase::Title => None,
            Phase::Selecting(b) | Phase::Draw(b) => Some(b),
            Phase::Playing(p) => Some(&mut p.board),
            Phase::Finished(f) => Some(&mut f.board),
        }
    }
}
