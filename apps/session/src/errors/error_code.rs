//! Error codes for the match session core.
//!
//! This module defines all error codes surfaced to the rendering layer.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in snapshots (`lastError.code`) and in `AppError`.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Intent validation
    /// Tile is not in the zone it was taken from
    TileNotInZone,
    /// Hand already holds 13 tiles
    HandFull,
    /// Hand does not hold exactly 13 tiles
    HandSizeMismatch,
    /// Intent not allowed in the current phase
    PhaseMismatch,
    /// Not the player's turn
    OutOfTurn,
    /// Oracle call or opponent turn outstanding
    SessionBusy,
    /// Selected hand is not one tile from a win
    NotTenpai,
    /// Tile kind string could not be parsed
    ParseTile,
    /// Deal does not satisfy deck constraints
    InvalidDeal,
    /// General validation error
    ValidationError,

    // Oracle
    /// Oracle unreachable or exited with an error
    OracleUnavailable,
    /// Oracle did not answer in time
    OracleTimeout,
    /// Oracle answered with an unusable payload
    OracleMalformedResponse,

    // System
    /// Tile conservation broken; round was re-dealt
    InvariantViolation,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TileNotInZone => "TILE_NOT_IN_ZONE",
            Self::HandFull => "HAND_FULL",
            Self::HandSizeMismatch => "HAND_SIZE_MISMATCH",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::SessionBusy => "SESSION_BUSY",
            Self::NotTenpai => "NOT_TENPAI",
            Self::ParseTile => "PARSE_TILE",
            Self::InvalidDeal => "INVALID_DEAL",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::OracleUnavailable => "ORACLE_UNAVAILABLE",
            Self::OracleTimeout => "ORACLE_TIMEOUT",
            Self::OracleMalformedResponse => "ORACLE_MALFORMED_RESPONSE",

            Self::InvariantViolation => "INVARIANT_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
