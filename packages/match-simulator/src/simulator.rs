//! Headless match runner.
//!
//! Drives a [`MatchService`] through whole matches with an automatic player:
//! take the first suggested tenpai shape (or the first 13 pool tiles), then
//! discard pool tiles that are not among its waits.

use std::collections::HashSet;

use mahjong_session::domain::{PhaseSnapshot, Score, Side, Tile, WinningInfo};
use mahjong_session::{
    AppError, MatchService, SessionConfig, SessionSnapshot, TileId, TileKind, ZoneName,
};
use tracing::{debug, warn};

const HAND_SIZE: usize = 13;

/// Hard stop for a match that never reaches the score target. Re-deals
/// after a fault count as rounds here.
const MAX_ROUNDS: u32 = 500;

/// Hard stop for a round that never finishes.
const MAX_DISCARDS_PER_ROUND: usize = 64;

/// How a single round ended.
#[derive(Debug, Clone)]
pub enum RoundOutcome {
    Win(WinningInfo),
    Draw,
}

#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round: u32,
    pub outcome: RoundOutcome,
    /// Player discards made during the round.
    pub discards: usize,
    /// Whether the selected hand came from an oracle suggestion.
    pub suggested: bool,
    pub score_after: Score,
}

/// Result of simulating a complete match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub final_score: Score,
    pub winner: Option<Side>,
    pub rounds: Vec<RoundRecord>,
    /// Faults the session reported along the way (oracle errors, recoveries).
    pub faults: u32,
}

impl MatchResult {
    pub fn draws(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| matches!(r.outcome, RoundOutcome::Draw))
            .count()
    }
}

/// Runs one match against a freshly built service.
pub struct Simulator {
    service: MatchService,
    faults: u32,
}

impl Simulator {
    pub fn new(config: SessionConfig) -> Result<Self, SimulatorError> {
        let service = MatchService::new(config).map_err(SimulatorError::Session)?;
        Ok(Self { service, faults: 0 })
    }

    /// Play from the title screen until the match is over.
    pub async fn simulate_match(mut self) -> Result<MatchResult, SimulatorError> {
        let mut snap = self.service.start_match()?;
        let mut rounds = Vec::new();

        for _ in 0..MAX_ROUNDS {
            let (selected, waits) = self.select_hand(snap).await?;
            let suggested = !waits.is_empty();
            let (ended, discards) = self.play_round(selected, &waits).await?;
            snap = ended;

            let outcome = match &snap.phase {
                PhaseSnapshot::Finished(f) => RoundOutcome::Win(f.winning.clone()),
                PhaseSnapshot::Draw(_) => RoundOutcome::Draw,
                // The session re-dealt the round after a fault.
                PhaseSnapshot::Selecting(_) => continue,
                other => {
                    return Err(SimulatorError::InvalidState(format!(
                        "round ended in phase {}",
                        other.name()
                    )))
                }
            };
            debug!(round = snap.round, ?outcome, "round over");
            rounds.push(RoundRecord {
                round: snap.round,
                outcome,
                discards,
                suggested,
                score_after: snap.score,
            });

            let final_score = snap.score;
            snap = self.service.advance_round()?;
            if matches!(snap.phase, PhaseSnapshot::Title) {
                return Ok(MatchResult {
                    final_score,
                    winner: final_score.leader_at_target(),
                    rounds,
                    faults: self.faults,
                });
            }
        }
        Err(SimulatorError::InvalidState(format!(
            "match still running after {MAX_ROUNDS} rounds"
        )))
    }

    /// Build a 13-tile hand and confirm it. Returns the waits of the
    /// suggested shape that was used, empty for the fallback hand.
    async fn select_hand(
        &mut self,
        mut snap: SessionSnapshot,
    ) -> Result<(SessionSnapshot, HashSet<TileKind>), SimulatorError> {
        let pool = selecting_pool(&snap)?;
        let patterns = self.service.suggest_tenpai().await;
        let suggested = patterns.first().and_then(|p| {
            let ids = pick_kinds(&pool, &p.tiles)?;
            let waits = p.waiting_tiles.iter().map(|w| w.tile).collect();
            Some((ids, waits))
        });
        let (picks, waits) = suggested.unwrap_or_else(|| {
            let ids = pool.iter().take(HAND_SIZE).map(|t| t.id).collect();
            (ids, HashSet::new())
        });
        debug!(round = snap.round, waits = waits.len(), "hand chosen");

        for id in picks {
            snap = self
                .service
                .move_tile(id, ZoneName::Pool, ZoneName::Hand, None)?;
        }

        snap = self.service.confirm_selection().await?;
        self.note_fault(&snap);
        if !matches!(snap.phase, PhaseSnapshot::Playing(_)) {
            return Err(SimulatorError::InvalidState(format!(
                "selection confirmed into phase {}",
                snap.phase.name()
            )));
        }
        Ok((snap, waits))
    }

    /// Discard until the round finishes or draws.
    async fn play_round(
        &mut self,
        mut snap: SessionSnapshot,
        waits: &HashSet<TileKind>,
    ) -> Result<(SessionSnapshot, usize), SimulatorError> {
        let mut discards = 0;

        while let PhaseSnapshot::Playing(playing) = &snap.phase {
            if discards >= MAX_DISCARDS_PER_ROUND {
                return Err(SimulatorError::InvalidState(format!(
                    "round {} still playing after {discards} discards",
                    snap.round
                )));
            }
            let Some(tile) = choose_discard(&playing.table.pool, waits) else {
                return Err(SimulatorError::InvalidState(
                    "playing with an empty pool".to_string(),
                ));
            };
            snap = self.service.discard_tile(tile.id).await?;
            self.note_fault(&snap);
            discards += 1;
        }
        Ok((snap, discards))
    }

    fn note_fault(&mut self, snap: &SessionSnapshot) {
        if let Some(fault) = &snap.last_error {
            self.faults += 1;
            warn!(code = %fault.code.as_str(), message = %fault.message, "session fault");
        }
    }
}

fn selecting_pool(snap: &SessionSnapshot) -> Result<Vec<Tile>, SimulatorError> {
    match &snap.phase {
        PhaseSnapshot::Selecting(s) => Ok(s.pool.clone()),
        other => Err(SimulatorError::InvalidState(format!(
            "expected selecting, got {}",
            other.name()
        ))),
    }
}

/// One pool tile id per wanted kind, or `None` if the pool cannot supply them.
fn pick_kinds(pool: &[Tile], wanted: &[TileKind]) -> Option<Vec<TileId>> {
    if wanted.len() != HAND_SIZE {
        return None;
    }
    let mut used = HashSet::new();
    wanted
        .iter()
        .map(|kind| {
            let tile = pool
                .iter()
                .find(|t| t.kind == *kind && !used.contains(&t.id))?;
            used.insert(tile.id);
            Some(tile.id)
        })
        .collect()
}

/// First pool tile that is not a wait; any pool tile if all of them are.
fn choose_discard<'a>(pool: &'a [Tile], waits: &HashSet<TileKind>) -> Option<&'a Tile> {
    pool.iter()
        .find(|t| !waits.contains(&t.kind))
        .or_else(|| pool.first())
}

#[derive(Debug)]
pub enum SimulatorError {
    /// The service rejected an intent
    Session(AppError),
    /// The match reached a state the automatic player cannot continue from
    InvalidState(String),
}

impl From<AppError> for SimulatorError {
    fn from(err: AppError) -> Self {
        SimulatorError::Session(err)
    }
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Session(err) => write!(f, "Session error: {err}"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_session::domain::{parse_compact, TileIdGen};

    fn tiles(compact: &str) -> Vec<Tile> {
        let mut ids = TileIdGen::new();
        parse_compact(compact)
            .unwrap()
            .into_iter()
            .map(|kind| ids.mint(kind))
            .collect()
    }

    #[test]
    fn discard_skips_waits() {
        let pool = tiles("3s3s7z1m");
        let waits: HashSet<TileKind> = parse_compact("3s").unwrap().into_iter().collect();
        assert_eq!(choose_discard(&pool, &waits).unwrap().kind, pool[2].kind);
    }

    #[test]
    fn discard_falls_back_to_first_when_all_are_waits() {
        let pool = tiles("3s3s");
        let waits: HashSet<TileKind> = parse_compact("3s").unwrap().into_iter().collect();
        assert_eq!(choose_discard(&pool, &waits).unwrap().id, pool[0].id);
    }

    #[test]
    fn pick_kinds_uses_distinct_ids() {
        let pool = tiles("123m456p999s45s22z7z");
        let wanted = parse_compact("123m456p999s45s22z").unwrap();
        let ids = pick_kinds(&pool, &wanted).unwrap();
        assert_eq!(ids.len(), 13);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 13);
    }

    #[test]
    fn pick_kinds_rejects_missing_copies() {
        let pool = tiles("123m456p999s45s2z7z1m");
        let wanted = parse_compact("123m456p999s45s22z").unwrap();
        assert!(pick_kinds(&pool, &wanted).is_none());
    }
}
