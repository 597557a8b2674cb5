//! Edge-triggered match transitions derived from before/after snapshots.
//!
//! Used by the service layer for `info`-level logging of what an intent did.

use crate::domain::scoring::Score;
use crate::domain::snapshot::{PhaseSnapshot, SessionSnapshot};
use crate::domain::state::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTransition {
    PhaseChanged {
        from: &'static str,
        to: &'static str,
    },
    /// Edge-triggered: the turn passed to `side` during play.
    TurnBecame { side: Side },
    RoundStarted { round: u32 },
    WinRecorded { winner: Side, han: u32, points: u32 },
    /// Edge-triggered: a side reached the match target.
    MatchEnded { score: Score },
}

fn turn_of(s: &SessionSnapshot) -> Option<Side> {
    match &s.phase {
        PhaseSnapshot::Playing(p) => Some(p.turn),
        _ => None,
    }
}

/// Derive transitions from before/after snapshots of one intent.
pub fn derive_match_transitions(
    before: &SessionSnapshot,
    after: &SessionSnapshot,
) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    let (from, to) = (before.phase.name(), after.phase.name());
    if from != to {
        transitions.push(MatchTransition::PhaseChanged { from, to });
    }

    // Re-deals within a round keep the round number and are not reported.
    if to == "selecting" && (from != "selecting" || before.round != after.round) {
        transitions.push(MatchTransition::RoundStarted { round: after.round });
    }

    if let Some(side) = turn_of(after) {
        if turn_of(before) != Some(side) {
            transitions.push(MatchTransition::TurnBecame { side });
        }
    }

    if let PhaseSnapshot::Finished(done) = &after.phase {
        if from != "finished" {
            transitions.push(MatchTransition::WinRecorded {
                winner: done.winning.winner,
                han: done.winning.han,
                points: done.winning.points,
            });
        }
    }

    if !before.is_match_over && after.is_match_over {
        transitions.push(MatchTransition::MatchEnded { score: after.score });
    }

    transitions
}
