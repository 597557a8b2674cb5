//! Test support for the match session crate.
//!
//! Logging setup, a scripted oracle whose answers and timing tests control,
//! predictable opponents and fixed deals.

pub mod fixtures;
pub mod scripted_oracle;
pub mod scripted_opponent;
pub mod test_logging;

pub use scripted_opponent::{BrokenOpponent, DiscardlessOpponent, FirstTilesOpponent};
pub use scripted_oracle::{OracleGate, ScriptedOracle};
