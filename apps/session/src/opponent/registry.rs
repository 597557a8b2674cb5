//! Registered opponent strategies, looked up by stable name.

use super::{OpponentStrategy, RandomOpponent, TenpaiSeeker};

pub struct OpponentFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn OpponentStrategy>,
}

static OPPONENT_FACTORIES: &[OpponentFactory] = &[
    OpponentFactory {
        name: RandomOpponent::NAME,
        version: RandomOpponent::VERSION,
        make: make_random,
    },
    OpponentFactory {
        name: TenpaiSeeker::NAME,
        version: TenpaiSeeker::VERSION,
        make: make_tenpai_seeker,
    },
];

pub fn registered_opponents() -> &'static [OpponentFactory] {
    OPPONENT_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static OpponentFactory> {
    registered_opponents().iter().find(|f| f.name == name)
}

fn make_random(seed: Option<u64>) -> Box<dyn OpponentStrategy> {
    Box::new(RandomOpponent::new(seed))
}

fn make_tenpai_seeker(seed: Option<u64>) -> Box<dyn OpponentStrategy> {
    Box::new(TenpaiSeeker::new(seed))
}
