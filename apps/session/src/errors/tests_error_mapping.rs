// Unit tests for error mapping - pure domain logic without oracle or runtime dependencies
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_codes() {
    let cases = [
        (ValidationKind::TileNotInZone, "TILE_NOT_IN_ZONE"),
        (ValidationKind::HandFull, "HAND_FULL"),
        (ValidationKind::HandSizeMismatch, "HAND_SIZE_MISMATCH"),
        (ValidationKind::Busy, "SESSION_BUSY"),
        (ValidationKind::OutOfTurn, "OUT_OF_TURN"),
        (ValidationKind::Other("x".into()), "VALIDATION_ERROR"),
    ];
    for (kind, expected) in cases {
        let app: AppError = DomainError::validation(kind, "rejected").into();
        assert!(app.is_validation());
        assert_eq!(app.code().as_str(), expected);
    }
}

#[test]
fn maps_infra_to_oracle_errors() {
    let app: AppError = DomainError::infra(InfraErrorKind::OracleTimeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::OracleTimeout);
    assert_eq!(app.detail(), "slow");

    let app: AppError = DomainError::infra(InfraErrorKind::Other("exit 2".into()), "x").into();
    assert_eq!(app.code(), ErrorCode::OracleUnavailable);
}

#[test]
fn maps_invariant_to_internal() {
    let app: AppError = DomainError::invariant("duplicate tile-3").into();
    assert_eq!(app.code(), ErrorCode::Internal);
    assert!(matches!(app, AppError::Internal { .. }));
}

#[test]
fn error_codes_serialize_as_strings() {
    let json = serde_json::to_string(&ErrorCode::SessionBusy).unwrap();
    assert_eq!(json, "\"SESSION_BUSY\"");
}
