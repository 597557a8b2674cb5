//! Match flow service - drives one [`MatchSession`] through its suspensions.
//!
//! The session itself is a synchronous state machine. This facade owns it
//! behind a mutex, runs oracle calls and the opponent's thinking delay
//! without holding the lock, and feeds results back with their tickets.

mod intents;
mod opponent_turn;
mod oracle_checks;
mod round_lifecycle;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::session::{OpponentKind, SessionConfig};
use crate::domain::match_transition::derive_match_transitions;
use crate::domain::{snapshot, MatchSession, RoundIntent, SessionSnapshot};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::opponent::{create_opponent, OpponentFailureMode, OpponentStrategy};
use crate::oracle::{create_oracle, OracleClient};

/// Where the per-round opponent strategy comes from.
enum OpponentSource {
    /// Fresh strategy of this kind per round, seeded from the deal.
    Configured(OpponentKind),
    /// One strategy for every round.
    Fixed(Arc<dyn OpponentStrategy>),
}

/// Cancellation for timers started under one epoch.
struct EpochToken {
    epoch: u64,
    token: CancellationToken,
}

pub struct MatchService {
    session: Arc<Mutex<MatchSession>>,
    oracle: Arc<dyn OracleClient>,
    config: SessionConfig,
    source: OpponentSource,
    strategy: Mutex<Arc<dyn OpponentStrategy>>,
    failure_mode: OpponentFailureMode,
    cancel: Mutex<EpochToken>,
}

impl MatchService {
    /// Service with the oracle and opponent named in `config`.
    pub fn new(config: SessionConfig) -> Result<Self, AppError> {
        let oracle = create_oracle(&config)?;
        Ok(Self::with_oracle(config, oracle))
    }

    /// Service talking to a caller-supplied oracle.
    pub fn with_oracle(config: SessionConfig, oracle: Arc<dyn OracleClient>) -> Self {
        let seed = config.match_seed.unwrap_or_else(rand::random::<u64>);
        let session = MatchSession::new(seed);
        let epoch = session.epoch();
        let strategy: Arc<dyn OpponentStrategy> = Arc::from(create_opponent(config.opponent, Some(seed)));
        Self {
            session: Arc::new(Mutex::new(session)),
            oracle,
            source: OpponentSource::Configured(config.opponent),
            config,
            strategy: Mutex::new(strategy),
            failure_mode: OpponentFailureMode::FallbackFirst,
            cancel: Mutex::new(EpochToken {
                epoch,
                token: CancellationToken::new(),
            }),
        }
    }

    /// Use `strategy` for every round instead of the configured kind.
    pub fn with_opponent_strategy(mut self, strategy: Arc<dyn OpponentStrategy>) -> Self {
        *self.strategy.lock() = strategy.clone();
        self.source = OpponentSource::Fixed(strategy);
        self
    }

    pub fn with_failure_mode(mut self, mode: OpponentFailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session_id(&self) -> Uuid {
        self.session.lock().session_id()
    }

    pub fn match_seed(&self) -> u64 {
        self.session.lock().match_seed()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        snapshot(&self.session.lock())
    }

    fn current_strategy(&self) -> Arc<dyn OpponentStrategy> {
        self.strategy.lock().clone()
    }

    /// Token for timers started under `epoch`; cancelled once the session
    /// moves past it. A token for an already superseded epoch comes back
    /// cancelled.
    fn epoch_token(&self, epoch: u64) -> CancellationToken {
        let mut slot = self.cancel.lock();
        if epoch < slot.epoch {
            let stale = CancellationToken::new();
            stale.cancel();
            return stale;
        }
        if epoch > slot.epoch {
            slot.token.cancel();
            *slot = EpochToken {
                epoch,
                token: CancellationToken::new(),
            };
        }
        slot.token.clone()
    }

    /// Run a synchronous intent under the lock.
    ///
    /// Rejected intents leave the session untouched and return the error.
    fn mutate<T, F>(&self, intent: &'static str, f: F) -> Result<(T, SessionSnapshot), AppError>
    where
        F: FnOnce(&mut MatchSession) -> Result<T, DomainError>,
    {
        let mut session = self.session.lock();
        let before = snapshot(&session);
        let value = f(&mut session)?;
        tracing::debug!(
            session_id = %session.session_id(),
            round = session.round(),
            epoch = session.epoch(),
            intent,
            "intent accepted"
        );
        Ok((value, self.settle(&mut session, &before)))
    }

    /// After a mutation: enforce invariants, log transitions and cancel timers
    /// that belong to a superseded epoch.
    fn settle(&self, session: &mut MatchSession, before: &SessionSnapshot) -> SessionSnapshot {
        if let Err(err) = session.check_invariants() {
            self.recover(session, err);
        }
        let after = snapshot(session);
        for transition in derive_match_transitions(before, &after) {
            info!(
                session_id = %after.session_id,
                round = after.round,
                ?transition,
                "match transition"
            );
        }
        self.epoch_token(session.epoch());
        after
    }

    /// Re-deal the current round after an invariant violation.
    fn recover(&self, session: &mut MatchSession, err: DomainError) {
        error!(
            session_id = %session.session_id(),
            round = session.round(),
            error = %err,
            "session invariant violated; re-dealing round"
        );
        let redealt = session
            .prepare_round(RoundIntent::Recover)
            .and_then(|setup| self.install(session, setup));
        if let Err(again) = redealt {
            error!(error = %again, "re-deal failed; returning to title");
            session.return_to_title();
        }
        session.record_fault(&err);
    }
}

/// Armed for the lifetime of an async intent. If the intent's future is
/// dropped before it finishes, the checks it left outstanding are settled as
/// if the oracle had been unreachable.
struct PendingGuard<'a> {
    service: &'a MatchService,
    epoch: u64,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn arm(service: &'a MatchService) -> Self {
        let epoch = service.session.lock().epoch();
        Self {
            service,
            epoch,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.service.abandon(self.epoch);
        }
    }
}

#[cfg(test)]
mod tests_recovery;
