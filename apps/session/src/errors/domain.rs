//! Domain-level error type used across the session core and its adapters.
//!
//! This error type is transport-agnostic. The facade converts it into
//! `crate::error::AppError` (validation) or a `SessionFault` (oracle trouble)
//! using the helpers below.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Why a user intent was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    TileNotInZone,
    HandFull,
    HandSizeMismatch,
    PhaseMismatch,
    OutOfTurn,
    /// An oracle call or the opponent's turn is still outstanding.
    Busy,
    NotTenpai,
    ParseTile,
    InvalidDeal,
    Other(String),
}

/// Infra error kinds to distinguish oracle failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    OracleUnavailable,
    OracleTimeout,
    MalformedResponse,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or match rule violation
    Validation(ValidationKind, String),
    /// Oracle/transport failures
    Infra(InfraErrorKind, String),
    /// Broken tile conservation or other programmer error
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }

    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::TileNotInZone => ErrorCode::TileNotInZone,
                ValidationKind::HandFull => ErrorCode::HandFull,
                ValidationKind::HandSizeMismatch => ErrorCode::HandSizeMismatch,
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                ValidationKind::Busy => ErrorCode::SessionBusy,
                ValidationKind::NotTenpai => ErrorCode::NotTenpai,
                ValidationKind::ParseTile => ErrorCode::ParseTile,
                ValidationKind::InvalidDeal => ErrorCode::InvalidDeal,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::OracleUnavailable => ErrorCode::OracleUnavailable,
                InfraErrorKind::OracleTimeout => ErrorCode::OracleTimeout,
                InfraErrorKind::MalformedResponse => ErrorCode::OracleMalformedResponse,
                InfraErrorKind::Other(_) => ErrorCode::OracleUnavailable,
            },
            DomainError::Invariant(_) => ErrorCode::InvariantViolation,
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d) | DomainError::Infra(_, d) | DomainError::Invariant(d) => {
                d
            }
        }
    }
}
