//! The player's discard and everything it sets off.
//!
//! One call runs the whole exchange: opponent ron check, thinking delay,
//! opponent discard, player ron check. Each step re-takes the lock and is
//! dropped if its ticket went stale in the meantime.

use tokio::time::sleep;
use tracing::{debug, warn};

use super::{MatchService, PendingGuard};
use crate::domain::{
    snapshot, MatchSession, OpponentView, PendingCheck, PendingKind, Resolution, SessionSnapshot,
    TileId, WinQuery,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::opponent::OpponentFailureMode;

impl MatchService {
    /// Discard `id` from the pool and play the opponent's reply.
    pub async fn discard_tile(&self, id: TileId) -> Result<SessionSnapshot, AppError> {
        let guard = PendingGuard::arm(self);
        let result = self.discard_exchange(id).await;
        guard.disarm();
        result
    }

    async fn discard_exchange(&self, id: TileId) -> Result<SessionSnapshot, AppError> {
        let ((check, query), before) = self.mutate("discard_tile", |s| {
            let check = s.begin_player_discard(id)?;
            let query = s.win_query(&check)?;
            Ok((check, query))
        })?;

        // Does the discard complete the opponent's hand?
        let result = self.ask_win(&query).await;
        let thinking = {
            let mut session = self.session.lock();
            if session.resolve_opponent_ron(check.ticket, result) == Resolution::Stale {
                debug!(ticket = ?check.ticket, "stale opponent ron result dropped");
                return Ok(snapshot(&session));
            }
            match session.begin_opponent_turn() {
                Ok(Some(thinking)) => thinking,
                // Won, or the reserve ran out.
                Ok(None) | Err(_) => return Ok(self.settle(&mut session, &before)),
            }
        };

        let token = self.epoch_token(thinking.ticket.epoch);
        tokio::select! {
            _ = token.cancelled() => {
                debug!(ticket = ?thinking.ticket, "opponent turn cancelled");
                return Ok(self.snapshot());
            }
            _ = sleep(self.config.opponent_delay) => {}
        }

        let step = {
            let mut session = self.session.lock();
            self.opponent_discards(&mut session, &thinking)?
        };
        let Some((check, query)) = step else {
            return Ok(self.snapshot());
        };

        // Does the opponent's discard complete the player's hand?
        let result = self.ask_win(&query).await;
        let mut session = self.session.lock();
        if session.resolve_player_ron(check.ticket, result) == Resolution::Stale {
            debug!(ticket = ?check.ticket, "stale player ron result dropped");
            return Ok(snapshot(&session));
        }
        Ok(self.settle(&mut session, &before))
    }

    /// Settle the checks a dropped intent left outstanding under `epoch`.
    ///
    /// Oracle checks resolve as unavailable and the opponent discards without
    /// waiting out its delay, so the session ends up idle with the fault
    /// recorded.
    pub(super) fn abandon(&self, epoch: u64) {
        let mut session = self.session.lock();
        let before = snapshot(&session);
        let unavailable =
            || DomainError::infra(InfraErrorKind::OracleUnavailable, "caller stopped waiting");

        // Opponent ron, opponent discard, player ron.
        let mut steps = 0;
        while let Some(check) = session.pending().cloned() {
            if check.ticket.epoch != epoch {
                break;
            }
            if steps == 3 {
                self.recover(
                    &mut session,
                    DomainError::invariant("abandoned check could not be settled"),
                );
                break;
            }
            steps += 1;
            debug!(ticket = ?check.ticket, kind = ?check.kind, "settling abandoned check");
            match check.kind {
                PendingKind::TenpaiGate => {
                    if let Err(e) = session.resolve_tenpai_gate(check.ticket, Err(unavailable())) {
                        warn!(error = %e, "abandoned tenpai gate not applied");
                    }
                }
                PendingKind::OpponentRon { .. } => {
                    session.resolve_opponent_ron(check.ticket, Err(unavailable()));
                    if let Err(e) = session.begin_opponent_turn() {
                        debug!(error = %e, "no opponent turn after abandoned ron check");
                    }
                }
                PendingKind::OpponentThinking => {
                    if let Err(e) = self.opponent_discards(&mut session, &check) {
                        warn!(error = %e, "opponent discard failed while settling");
                    }
                }
                PendingKind::PlayerRon { .. } => {
                    session.resolve_player_ron(check.ticket, Err(unavailable()));
                }
            }
        }
        if steps > 0 {
            warn!(
                session_id = %session.session_id(),
                round = session.round(),
                steps,
                "intent dropped mid-flight; outstanding checks settled"
            );
            self.settle(&mut session, &before);
        }
    }

    /// Choose and apply the opponent's discard for `thinking`; returns the
    /// player ron check it leads to.
    fn opponent_discards(
        &self,
        session: &mut MatchSession,
        thinking: &PendingCheck,
    ) -> Result<Option<(PendingCheck, WinQuery)>, AppError> {
        if session.pending() != Some(thinking) {
            debug!(ticket = ?thinking.ticket, "opponent turn superseded");
            return Ok(None);
        }
        let view = session
            .opponent_view()
            .ok_or_else(|| DomainError::invariant("opponent thinking outside play"))?;
        let id = match self.pick_discard(&view) {
            Ok(id) => id,
            Err(e) => {
                // The thinking check would otherwise stay outstanding forever.
                self.recover(session, DomainError::invariant(e.detail().to_string()));
                return Err(e);
            }
        };
        match session.apply_opponent_discard(thinking.ticket, id)? {
            Resolution::Next(check) => {
                let query = session.win_query(&check)?;
                Ok(Some((check, query)))
            }
            Resolution::Applied | Resolution::Stale => Ok(None),
        }
    }

    fn pick_discard(&self, view: &OpponentView) -> Result<TileId, AppError> {
        let chosen = self
            .current_strategy()
            .choose_discard(view)
            .map_err(|e| e.to_string())
            .and_then(|id| {
                if view.holds(id) {
                    Ok(id)
                } else {
                    Err(format!("{id} is not in the reserve"))
                }
            });
        match (chosen, self.failure_mode) {
            (Ok(id), _) => Ok(id),
            (Err(reason), OpponentFailureMode::FallbackFirst) => {
                warn!(round = view.round, %reason, "opponent discard failed; using first reserve tile");
                view.first_reserve()
                    .ok_or_else(|| DomainError::invariant("opponent reserve is empty").into())
            }
            (Err(reason), OpponentFailureMode::Strict) => Err(AppError::internal(format!(
                "opponent discard failed: {reason}"
            ))),
        }
    }
}
