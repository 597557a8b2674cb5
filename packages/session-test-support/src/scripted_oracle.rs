//! Oracle double with queued answers, failure injection and a gate.
//!
//! Unqueued win checks answer "no win"; unqueued tenpai checks answer
//! "tenpai". With a gate installed every call waits for [`OracleGate::release`]
//! so tests can act while the session is awaiting the oracle.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use mahjong_session::domain::{TenpaiPattern, TenpaiVerdict, WinQuery, WinVerdict};
use mahjong_session::errors::domain::{DomainError, InfraErrorKind};
use mahjong_session::{OracleClient, TileKind};
use parking_lot::Mutex;
use tokio::sync::{Notify, Semaphore};

/// Lets a test hold oracle calls open and observe when one starts.
pub struct OracleGate {
    entered: Notify,
    permits: Semaphore,
}

impl Default for OracleGate {
    /// Closed: every call waits until [`OracleGate::release`].
    fn default() -> Self {
        Self {
            entered: Notify::new(),
            permits: Semaphore::new(0),
        }
    }
}

impl OracleGate {
    /// Wait until a gated call has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let `n` waiting (or future) calls through.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    async fn pass(&self) {
        self.entered.notify_one();
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }
}

#[derive(Default)]
pub struct ScriptedOracle {
    wins: Mutex<VecDeque<Result<WinVerdict, DomainError>>>,
    tenpai: Mutex<VecDeque<Result<TenpaiVerdict, DomainError>>>,
    suggestions: Mutex<Option<Result<Vec<TenpaiPattern>, DomainError>>>,
    always_fail: Mutex<Option<DomainError>>,
    gate: Option<Arc<OracleGate>>,
    queries: Mutex<Vec<WinQuery>>,
}

pub fn unavailable() -> DomainError {
    DomainError::infra(InfraErrorKind::OracleUnavailable, "connection refused")
}

pub fn win(han: u32) -> WinVerdict {
    WinVerdict {
        is_winning: true,
        yaku: vec!["Riichi".into()],
        han,
        fu: Some(30),
    }
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same oracle, but every call waits on `gate`.
    pub fn gated(gate: Arc<OracleGate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Every call fails with `err` until cleared.
    pub fn failing(err: DomainError) -> Self {
        let oracle = Self::default();
        *oracle.always_fail.lock() = Some(err);
        oracle
    }

    pub fn push_win(&self, result: Result<WinVerdict, DomainError>) -> &Self {
        self.wins.lock().push_back(result);
        self
    }

    pub fn push_tenpai(&self, result: Result<TenpaiVerdict, DomainError>) -> &Self {
        self.tenpai.lock().push_back(result);
        self
    }

    pub fn set_suggestions(&self, result: Result<Vec<TenpaiPattern>, DomainError>) {
        *self.suggestions.lock() = Some(result);
    }

    pub fn set_failing(&self, err: Option<DomainError>) {
        *self.always_fail.lock() = err;
    }

    /// Win checks received so far, in order.
    pub fn queries(&self) -> Vec<WinQuery> {
        self.queries.lock().clone()
    }

    async fn enter(&self) -> Result<(), DomainError> {
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        match self.always_fail.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OracleClient for ScriptedOracle {
    async fn check_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError> {
        self.queries.lock().push(query.clone());
        self.enter().await?;
        self.wins
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(WinVerdict::no_win()))
    }

    async fn suggest_tenpai(&self, _pool: &[TileKind]) -> Result<Vec<TenpaiPattern>, DomainError> {
        self.enter().await?;
        self.suggestions.lock().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn check_tenpai(
        &self,
        _hand: &[TileKind],
        _dora_indicator: TileKind,
    ) -> Result<TenpaiVerdict, DomainError> {
        self.enter().await?;
        self.tenpai.lock().pop_front().unwrap_or_else(|| {
            Ok(TenpaiVerdict {
                is_tenpai: true,
                waiting_tiles: Vec::new(),
            })
        })
    }
}
