#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod opponent;
pub mod oracle;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::session::{OpponentKind, OracleKind, SessionConfig};
pub use domain::{SessionSnapshot, Side, TileId, TileKind, ZoneName};
pub use error::AppError;
pub use errors::ErrorCode;
pub use opponent::{create_opponent, OpponentStrategy};
pub use oracle::{create_oracle, OracleClient};
pub use services::match_flow::MatchService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
