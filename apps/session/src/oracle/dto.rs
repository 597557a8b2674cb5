//! Wire contract shared by the HTTP and process adapters.

use serde::{Deserialize, Serialize};

use crate::domain::rules::HAND_SIZE;
use crate::domain::{TenpaiPattern, TenpaiVerdict, TileKind, WinQuery, WinVerdict};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinCheckRequest {
    pub tiles: Vec<TileKind>,
    pub last_tile: TileKind,
    pub dora: TileKind,
}

impl From<&WinQuery> for WinCheckRequest {
    fn from(q: &WinQuery) -> Self {
        Self {
            tiles: q.hand.clone(),
            last_tile: q.winning_tile,
            dora: q.dora_indicator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinCheckResponse {
    pub is_winning: bool,
    #[serde(default)]
    pub yaku: Option<Vec<String>>,
    #[serde(default)]
    pub han: Option<u32>,
    #[serde(default)]
    pub fu: Option<u32>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl WinCheckResponse {
    pub fn into_verdict(self) -> Result<WinVerdict, DomainError> {
        if let Some(err) = self.error {
            return Err(DomainError::infra(
                InfraErrorKind::OracleUnavailable,
                format!("oracle reported: {err}"),
            ));
        }
        if !self.is_winning {
            return Ok(WinVerdict::no_win());
        }
        let han = self.han.ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::MalformedResponse,
                "winning response without han",
            )
        })?;
        Ok(WinVerdict {
            is_winning: true,
            yaku: self.yaku.unwrap_or_default(),
            han,
            fu: self.fu,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub tiles: Vec<TileKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub patterns: Vec<TenpaiPattern>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SuggestResponse {
    pub fn into_patterns(self) -> Result<Vec<TenpaiPattern>, DomainError> {
        if let Some(err) = self.error {
            return Err(DomainError::infra(
                InfraErrorKind::OracleUnavailable,
                format!("oracle reported: {err}"),
            ));
        }
        if let Some(bad) = self.patterns.iter().find(|p| p.tiles.len() != HAND_SIZE) {
            return Err(DomainError::infra(
                InfraErrorKind::MalformedResponse,
                format!("suggested pattern has {} tiles", bad.tiles.len()),
            ));
        }
        Ok(self.patterns)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenpaiCheckRequest {
    pub tiles: Vec<TileKind>,
    pub dora: TileKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenpaiCheckResponse {
    pub is_tenpai: bool,
    #[serde(default)]
    pub waiting_tiles: Option<Vec<TileKind>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TenpaiCheckResponse {
    pub fn into_verdict(self) -> Result<TenpaiVerdict, DomainError> {
        if let Some(err) = self.error {
            return Err(DomainError::infra(
                InfraErrorKind::OracleUnavailable,
                format!("oracle reported: {err}"),
            ));
        }
        Ok(TenpaiVerdict {
            is_tenpai: self.is_tenpai,
            waiting_tiles: self.waiting_tiles.unwrap_or_default(),
        })
    }
}

/// Parse a response body, mapping any decode failure to `MalformedResponse`.
pub fn decode<T>(body: &str) -> Result<T, DomainError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(body.trim()).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::MalformedResponse,
            format!("unreadable oracle response: {e}"),
        )
    })
}
