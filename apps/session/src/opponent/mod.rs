//! Simulated opponent.
//!
//! - [`OpponentStrategy`] trait for hand selection and discards
//! - [`RandomOpponent`]: uniform random choices (seedable)
//! - [`TenpaiSeeker`]: plays a one-away hand and holds its waits
//! - a static registry to build strategies by name

mod random;
mod registry;
mod tenpai_seeker;
mod trait_def;

pub use random::RandomOpponent;
pub use registry::{by_name, registered_opponents, OpponentFactory};
pub use tenpai_seeker::TenpaiSeeker;
pub use trait_def::{OpponentError, OpponentStrategy};

use crate::config::session::OpponentKind;

/// How the service reacts when a strategy fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentFailureMode {
    /// Surface the error (tests)
    Strict,
    /// Log and take the first allowed tiles instead
    FallbackFirst,
}

pub fn create_opponent(kind: OpponentKind, seed: Option<u64>) -> Box<dyn OpponentStrategy> {
    match kind {
        OpponentKind::Random => Box::new(RandomOpponent::new(seed)),
        OpponentKind::Tenpai => Box::new(TenpaiSeeker::new(seed)),
    }
}
