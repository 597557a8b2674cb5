//! Dealing, advancing and abandoning rounds.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::{MatchService, OpponentSource};
use crate::domain::rules::HAND_SIZE;
use crate::domain::{MatchSession, RoundIntent, RoundSetup, SessionSnapshot, TileId, TileKind};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::opponent::{create_opponent, OpponentFailureMode, OpponentStrategy};

/// Ids are distinct, all drawn from `pool`, and exactly a hand's worth.
fn is_valid_hand(ids: &[TileId], pool: &[crate::domain::Tile]) -> bool {
    let distinct: HashSet<TileId> = ids.iter().copied().collect();
    ids.len() == HAND_SIZE
        && distinct.len() == HAND_SIZE
        && ids.iter().all(|id| pool.iter().any(|t| t.id == *id))
}

impl MatchService {
    /// Leave the title screen and deal round 1 of a new match.
    pub fn start_match(&self) -> Result<SessionSnapshot, AppError> {
        self.deal(RoundIntent::StartMatch, "start_match")
    }

    /// Throw the current selection away and deal the round again.
    pub fn deal_round(&self) -> Result<SessionSnapshot, AppError> {
        self.deal(RoundIntent::Redeal, "deal_round")
    }

    /// Start a match on a fixed deal (tutorial and tests).
    pub fn start_fixed_match(
        &self,
        pool: &[TileKind],
        opponent_pool: &[TileKind],
        dora_indicator: TileKind,
    ) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate("start_fixed_match", |s| {
            let setup = s.prepare_fixed_round(
                RoundIntent::StartMatch,
                pool,
                opponent_pool,
                dora_indicator,
            )?;
            self.install(s, setup)
        })?;
        Ok(snap)
    }

    /// After a win or draw: deal the next round, or go back to the title
    /// screen when the match is over.
    pub fn advance_round(&self) -> Result<SessionSnapshot, AppError> {
        let (ended, snap) = self.mutate("advance_round", |s| {
            let final_score = s.score();
            match s.advance_round()? {
                Some(setup) => self.install(s, setup).map(|()| None),
                None => Ok(Some(final_score)),
            }
        })?;
        if let Some(score) = ended {
            info!(
                session_id = %snap.session_id,
                player = score.player,
                opponent = score.opponent,
                "match over"
            );
        }
        Ok(snap)
    }

    /// Abandon the match from any phase. Outstanding checks and timers become stale.
    pub fn return_to_title(&self) -> SessionSnapshot {
        let mut session = self.session.lock();
        let before = crate::domain::snapshot(&session);
        session.return_to_title();
        tracing::debug!(session_id = %session.session_id(), "intent accepted: return_to_title");
        self.settle(&mut session, &before)
    }

    fn deal(&self, intent: RoundIntent, name: &'static str) -> Result<SessionSnapshot, AppError> {
        let (_, snap) = self.mutate(name, |s| {
            let setup = s.prepare_round(intent)?;
            self.install(s, setup)
        })?;
        Ok(snap)
    }

    /// Let the round's opponent pick its hand, then install the deal.
    pub(super) fn install(
        &self,
        session: &mut MatchSession,
        setup: RoundSetup,
    ) -> Result<(), DomainError> {
        let strategy = self.round_strategy(&setup);
        let pool = &setup.deal.opponent_pool;
        let chosen = strategy
            .choose_hand(pool, setup.deal.dora)
            .map_err(|e| e.to_string())
            .and_then(|ids| {
                if is_valid_hand(&ids, pool) {
                    Ok(ids)
                } else {
                    Err(format!("{} ids are not a hand from the pool", ids.len()))
                }
            });
        let hand = match (chosen, self.failure_mode) {
            (Ok(ids), _) => ids,
            (Err(reason), OpponentFailureMode::FallbackFirst) => {
                warn!(round = setup.round, %reason, "opponent hand choice failed; using first tiles");
                pool.iter().take(HAND_SIZE).map(|t| t.id).collect()
            }
            (Err(reason), OpponentFailureMode::Strict) => {
                return Err(DomainError::invariant(format!(
                    "opponent hand choice failed: {reason}"
                )));
            }
        };
        session.install_round(setup, &hand)?;
        *self.strategy.lock() = strategy;
        Ok(())
    }

    fn round_strategy(&self, setup: &RoundSetup) -> Arc<dyn OpponentStrategy> {
        match &self.source {
            OpponentSource::Configured(kind) => {
                Arc::from(create_opponent(*kind, Some(setup.opponent_seed)))
            }
            OpponentSource::Fixed(strategy) => strategy.clone(),
        }
    }
}
