//! Oracle round-trips: the tenpai gate, ron checks and suggestions.
//!
//! The session lock is released before every oracle call and re-taken to
//! apply the result under the ticket that was issued for it.

use std::future::Future;

use tracing::{debug, warn};

use super::{MatchService, PendingGuard};
use crate::domain::{
    snapshot, Phase, Resolution, SessionSnapshot, TenpaiPattern, WinQuery, WinVerdict,
};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};

impl MatchService {
    /// Bound an oracle call by the configured timeout.
    pub(super) async fn timed<T, F>(&self, what: &'static str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        let limit = self.config.oracle_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::infra(
                InfraErrorKind::OracleTimeout,
                format!("{what} took longer than {}ms", limit.as_millis()),
            )),
        }
    }

    pub(super) async fn ask_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError> {
        let result = self.timed("win check", self.oracle.check_win(query)).await;
        if let Err(e) = &result {
            warn!(error = %e, tile = %query.winning_tile, "win check failed");
        }
        result
    }

    /// Lock in the selected hand and start play.
    ///
    /// With `require_tenpai` configured the oracle must agree the hand is one
    /// tile from winning; an unreachable oracle lets the hand through.
    pub async fn confirm_selection(&self) -> Result<SessionSnapshot, AppError> {
        let guard = PendingGuard::arm(self);
        let result = self.confirm_exchange().await;
        guard.disarm();
        result
    }

    async fn confirm_exchange(&self) -> Result<SessionSnapshot, AppError> {
        let require = self.config.require_tenpai;
        let (gate, before) = self.mutate("confirm_selection", |s| {
            let Some(check) = s.begin_confirm(require)? else {
                return Ok(None);
            };
            let hand = s
                .selected_hand()
                .ok_or_else(|| DomainError::invariant("tenpai gate without a selection"))?;
            let dora = s
                .dora_indicator()
                .ok_or_else(|| DomainError::invariant("tenpai gate without a dora indicator"))?;
            Ok(Some((check, hand, dora)))
        })?;
        let Some((check, hand, dora)) = gate else {
            return Ok(before);
        };

        let result = self
            .timed("tenpai check", self.oracle.check_tenpai(&hand, dora))
            .await;
        if let Err(e) = &result {
            warn!(error = %e, "tenpai check failed; confirming anyway");
        }

        let mut session = self.session.lock();
        match session.resolve_tenpai_gate(check.ticket, result)? {
            Resolution::Stale => {
                debug!(ticket = ?check.ticket, "stale tenpai result dropped");
                Ok(snapshot(&session))
            }
            _ => Ok(self.settle(&mut session, &before)),
        }
    }

    /// Tenpai subsets of the 34 tiles being selected from. Advisory: any
    /// failure yields an empty list.
    pub async fn suggest_tenpai(&self) -> Vec<TenpaiPattern> {
        let pool = {
            let session = self.session.lock();
            match session.phase() {
                Phase::Selecting(board) => {
                    let mut kinds = board.zones.hand_kinds();
                    kinds.extend(board.zones.pool_kinds());
                    kinds
                }
                _ => return Vec::new(),
            }
        };
        match self
            .timed("tenpai suggestion", self.oracle.suggest_tenpai(&pool))
            .await
        {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!(error = %e, "tenpai suggestion failed");
                Vec::new()
            }
        }
    }
}
