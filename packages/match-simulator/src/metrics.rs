//! Per-match metrics written by the simulator.

use mahjong_session::domain::{Score, Side};
use serde::Serialize;

use crate::simulator::{MatchResult, RoundOutcome, RoundRecord};

/// One JSONL line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetrics {
    pub match_no: u32,
    pub seed: u64,
    pub timestamp: String,
    pub opponent: String,
    pub rounds: usize,
    pub score: Score,
    pub winner: Option<Side>,
    pub draws: usize,
    pub faults: u32,
    pub duration_ms: f64,
    pub round_details: Vec<RoundMetrics>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundMetrics {
    pub round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_tile: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub yaku: Vec<String>,
    pub han: u32,
    pub points: u32,
    pub discards: usize,
    pub suggested_hand: bool,
    pub score_after: Score,
}

/// Flat row for the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub match_no: u32,
    pub seed: u64,
    pub opponent: String,
    pub rounds: usize,
    pub player_score: u32,
    pub opponent_score: u32,
    pub winner: String,
    pub draws: usize,
    pub duration_ms: f64,
}

impl From<&MatchMetrics> for CsvSummaryRow {
    fn from(m: &MatchMetrics) -> Self {
        Self {
            match_no: m.match_no,
            seed: m.seed,
            opponent: m.opponent.clone(),
            rounds: m.rounds,
            player_score: m.score.player,
            opponent_score: m.score.opponent,
            winner: winner_label(m.winner).to_string(),
            draws: m.draws,
            duration_ms: m.duration_ms,
        }
    }
}

pub fn winner_label(winner: Option<Side>) -> &'static str {
    match winner {
        Some(Side::Player) => "player",
        Some(Side::Opponent) => "opponent",
        None => "none",
    }
}

pub fn build_match_metrics(
    match_no: u32,
    seed: u64,
    opponent: &str,
    result: &MatchResult,
    duration_ms: f64,
) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    MatchMetrics {
        match_no,
        seed,
        timestamp,
        opponent: opponent.to_string(),
        rounds: result.rounds.len(),
        score: result.final_score,
        winner: result.winner,
        draws: result.draws(),
        faults: result.faults,
        duration_ms,
        round_details: result.rounds.iter().map(build_round_metrics).collect(),
    }
}

fn build_round_metrics(round: &RoundRecord) -> RoundMetrics {
    let base = RoundMetrics {
        round: round.round,
        winner: None,
        winning_tile: None,
        yaku: Vec::new(),
        han: 0,
        points: 0,
        discards: round.discards,
        suggested_hand: round.suggested,
        score_after: round.score_after,
    };
    match &round.outcome {
        RoundOutcome::Draw => base,
        RoundOutcome::Win(info) => RoundMetrics {
            winner: Some(info.winner),
            winning_tile: Some(info.winning_tile.code()),
            yaku: info.yaku.clone(),
            han: info.han,
            points: info.points,
            ..base
        },
    }
}
