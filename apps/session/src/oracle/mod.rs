//! Rule oracle: the port the match service asks about wins and tenpai.
//!
//! Adapters:
//! - [`LocalOracle`]: in-process evaluator
//! - [`HttpOracle`]: JSON over HTTP (`/api/check-win`, ...)
//! - [`ProcessOracle`]: a script spawned per request

pub mod dto;
mod http;
mod local;
mod process;

use std::sync::Arc;

use async_trait::async_trait;

pub use http::HttpOracle;
pub use local::LocalOracle;
pub use process::ProcessOracle;

use crate::config::session::{OracleKind, SessionConfig};
use crate::domain::{TenpaiPattern, TenpaiVerdict, TileKind, WinQuery, WinVerdict};
use crate::error::AppError;
use crate::errors::domain::DomainError;

#[async_trait]
pub trait OracleClient: Send + Sync {
    /// Does `query.winning_tile` complete `query.hand`, and for how much?
    async fn check_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError>;

    /// Tenpai 13-tile subsets of a 34-tile pool. Advisory only.
    async fn suggest_tenpai(&self, pool: &[TileKind]) -> Result<Vec<TenpaiPattern>, DomainError>;

    async fn check_tenpai(
        &self,
        hand: &[TileKind],
        dora_indicator: TileKind,
    ) -> Result<TenpaiVerdict, DomainError>;
}

/// Build the adapter selected by `cfg.oracle`.
pub fn create_oracle(cfg: &SessionConfig) -> Result<Arc<dyn OracleClient>, AppError> {
    let oracle: Arc<dyn OracleClient> = match cfg.oracle {
        OracleKind::Local => Arc::new(LocalOracle::new()),
        OracleKind::Http => Arc::new(HttpOracle::new(&cfg.oracle_url, cfg.oracle_timeout)?),
        OracleKind::Process => Arc::new(ProcessOracle::new(&cfg.python, &cfg.oracle_script)),
    };
    Ok(oracle)
}
