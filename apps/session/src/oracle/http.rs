//! Oracle reached over JSON/HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::dto::{
    decode, SuggestRequest, SuggestResponse, TenpaiCheckRequest, TenpaiCheckResponse,
    WinCheckRequest, WinCheckResponse,
};
use super::OracleClient;
use crate::domain::{TenpaiPattern, TenpaiVerdict, TileKind, WinQuery, WinVerdict};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const CHECK_WIN_PATH: &str = "/api/check-win";
pub const SUGGEST_TENPAI_PATH: &str = "/api/suggest-tenpai";
pub const CHECK_TENPAI_PATH: &str = "/api/check-tenpai";

#[derive(Debug, Clone)]
pub struct HttpOracle {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build oracle HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, DomainError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "oracle request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(DomainError::infra(
                InfraErrorKind::OracleUnavailable,
                format!("oracle returned {status}: {text}"),
            ));
        }
        decode(&text)
    }
}

fn transport_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::infra(InfraErrorKind::OracleTimeout, format!("oracle timed out: {e}"))
    } else {
        DomainError::infra(
            InfraErrorKind::OracleUnavailable,
            format!("oracle unreachable: {e}"),
        )
    }
}

#[async_trait]
impl OracleClient for HttpOracle {
    async fn check_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError> {
        let resp: WinCheckResponse = self
            .post(CHECK_WIN_PATH, &WinCheckRequest::from(query))
            .await?;
        resp.into_verdict()
    }

    async fn suggest_tenpai(&self, pool: &[TileKind]) -> Result<Vec<TenpaiPattern>, DomainError> {
        let req = SuggestRequest {
            tiles: pool.to_vec(),
        };
        let resp: SuggestResponse = self.post(SUGGEST_TENPAI_PATH, &req).await?;
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
        let resp: TenpaiCheckResponse = self.post(CHECK_TENPAI_PATH, &req).await?;
        resp.into_verdict()
    }
}
