//! Oracle run as a script, one process per request.
//!
//! The request JSON (plus an `action` field) is passed as the first argument;
//! the script prints its JSON response on stdout.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, warn};

use super::dto::{
    decode, SuggestRequest, SuggestResponse, TenpaiCheckRequest, TenpaiCheckResponse,
    WinCheckRequest, WinCheckResponse,
};
use super::OracleClient;
use crate::domain::{TenpaiPattern, TenpaiVerdict, TileKind, WinQuery, WinVerdict};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Serialize)]
struct ScriptPayload<'a, T: Serialize> {
    action: &'a str,
    #[serde(flatten)]
    request: &'a T,
}

#[derive(Debug, Clone)]
pub struct ProcessOracle {
    interpreter: String,
    script: PathBuf,
}

impl ProcessOracle {
    pub fn new(interpreter: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
        }
    }

    async fn run<Req, Resp>(&self, action: &str, request: &Req) -> Result<Resp, DomainError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_string(&ScriptPayload { action, request })
            .map_err(|e| DomainError::invariant(format!("oracle request not encodable: {e}")))?;
        debug!(action, script = %self.script.display(), "spawning oracle script");

        let output = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg(&payload)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::OracleUnavailable,
                    format!("failed to run {}: {e}", self.interpreter),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(action, status = %output.status, stderr = %stderr.trim(), "oracle script failed");
            return Err(DomainError::infra(
                InfraErrorKind::OracleUnavailable,
                format!("oracle script exited with {}", output.status),
            ));
        }
        decode(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl OracleClient for ProcessOracle {
    async fn check_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError> {
        let resp: WinCheckResponse = self
            .run("check-win", &WinCheckRequest::from(query))
            .await?;
        resp.into_verdict()
    }

    async fn suggest_tenpai(&self, pool: &[TileKind]) -> Result<Vec<TenpaiPattern>, DomainError> {
        let req = SuggestRequest {
            tiles: pool.to_vec(),
        };
        let resp: SuggestResponse = self.run("suggest-tenpai", &req).await?;
        resp.into_patterns()
    }

    async fn check_tenpai(
        &self,
        hand: &[TileKind],
        dora_indicator: TileKind,
    ) -> Result<TenpaiVerdict, DomainError> {
        let req = TenpaiCheckRequest {
            tiles: hand.to_vec(),
            dora: dora_indicator,
        };
        let resp: TenpaiCheckResponse = self.run("check-tenpai", &req).await?;
        resp.into_verdict()
    }
}
