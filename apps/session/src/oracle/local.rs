//! In-process oracle.
//!
//! Closed hands only, won off a discard. Riichi is always granted, so every
//! complete shape has at least one yaku.

use async_trait::async_trait;

use super::OracleClient;
use crate::domain::hand_shape::{
    is_seven_pairs, is_thirteen_orphans, standard_decompositions, tenpai_subsets, winning_kinds,
    Counts, Decomposition, Meld,
};
use crate::domain::rules::HAND_SIZE;
use crate::domain::tiles_logic::{dora_from_indicator, kind_counts};
use crate::domain::{TenpaiPattern, TenpaiVerdict, TileKind, WaitingTile, WinQuery, WinVerdict};
use crate::errors::domain::{DomainError, ValidationKind};

/// Patterns returned per suggestion request.
const SUGGESTION_LIMIT: usize = 5;

const KOKUSHI_HAN: u32 = 13;
const STANDARD_FU: u32 = 30;
const SEVEN_PAIRS_FU: u32 = 25;

const DRAGONS: [(usize, &str); 3] = [
    (31, "Yakuhai (haku)"),
    (32, "Yakuhai (hatsu)"),
    (33, "Yakuhai (chun)"),
];

#[derive(Debug, Clone, Default)]
pub struct LocalOracle;

impl LocalOracle {
    pub fn new() -> Self {
        Self
    }
}

fn all_simples(counts: &Counts) -> bool {
    counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0)
        .all(|(i, _)| TileKind::from_index(i).is_some_and(|k| k.is_simple()))
}

fn standard_yaku(d: &Decomposition, counts: &Counts) -> (Vec<String>, u32) {
    let mut yaku = vec!["Riichi".to_string()];
    let mut han = 1;
    if all_simples(counts) {
        yaku.push("Tanyao".into());
        han += 1;
    }
    if d.melds.iter().all(|m| matches!(m, Meld::Triplet(_))) {
        yaku.push("Toitoi".into());
        han += 2;
    }
    for (idx, name) in DRAGONS {
        if d.melds.contains(&Meld::Triplet(idx)) {
            yaku.push(name.into());
            han += 1;
        }
    }
    (yaku, han)
}

fn seven_pairs_yaku(counts: &Counts) -> (Vec<String>, u32) {
    let mut yaku = vec!["Riichi".to_string(), "Chiitoitsu".to_string()];
    let mut han = 3;
    if all_simples(counts) {
        yaku.push("Tanyao".into());
        han += 1;
    }
    (yaku, han)
}

/// Best reading of `hand + winning` with dora counted when an indicator is given.
pub(crate) fn evaluate(
    hand: &[TileKind],
    winning: TileKind,
    dora_indicator: Option<TileKind>,
) -> WinVerdict {
    let counts = kind_counts(hand.iter().copied().chain(std::iter::once(winning)));

    if is_thirteen_orphans(&counts) {
        return WinVerdict {
            is_winning: true,
            yaku: vec!["Kokushi Musou".into()],
            han: KOKUSHI_HAN,
            fu: None,
        };
    }

    let mut best: Option<(Vec<String>, u32, u32)> = None;
    for d in standard_decompositions(&counts) {
        let (yaku, han) = standard_yaku(&d, &counts);
        if best.as_ref().is_none_or(|b| han > b.1) {
            best = Some((yaku, han, STANDARD_FU));
        }
    }
    if is_seven_pairs(&counts) {
        let (yaku, han) = seven_pairs_yaku(&counts);
        if best.as_ref().is_none_or(|b| han > b.1) {
            best = Some((yaku, han, SEVEN_PAIRS_FU));
        }
    }

    let Some((mut yaku, mut han, fu)) = best else {
        return WinVerdict::no_win();
    };
    if let Some(indicator) = dora_indicator {
        let dora = dora_from_indicator(indicator);
        let n = u32::from(counts[dora.index()]);
        if n > 0 {
            yaku.push(format!("Dora {n}"));
            han += n;
        }
    }
    WinVerdict {
        is_winning: true,
        yaku,
        han,
        fu: Some(fu),
    }
}

fn ensure_hand(hand: &[TileKind]) -> Result<(), DomainError> {
    if hand.len() != HAND_SIZE {
        return Err(DomainError::validation(
            ValidationKind::HandSizeMismatch,
            format!("oracle needs {HAND_SIZE} tiles, got {}", hand.len()),
        ));
    }
    Ok(())
}

#[async_trait]
impl OracleClient for LocalOracle {
    async fn check_win(&self, query: &WinQuery) -> Result<WinVerdict, DomainError> {
        ensure_hand(&query.hand)?;
        Ok(evaluate(
            &query.hand,
            query.winning_tile,
            Some(query.dora_indicator),
        ))
    }

    async fn suggest_tenpai(&self, pool: &[TileKind]) -> Result<Vec<TenpaiPattern>, DomainError> {
        let patterns = tenpai_subsets(pool, SUGGESTION_LIMIT)
            .into_iter()
            .map(|tiles| {
                let waiting_tiles = winning_kinds(&tiles)
                    .into_iter()
                    .map(|tile| WaitingTile {
                        tile,
                        yaku: evaluate(&tiles, tile, None).yaku,
                    })
                    .collect();
                TenpaiPattern {
                    tiles,
                    waiting_tiles,
                }
            })
            .collect();
        Ok(patterns)
    }

    async fn check_tenpai(
        &self,
        hand: &[TileKind],
        _dora_indicator: TileKind,
    ) -> Result<TenpaiVerdict, DomainError> {
        ensure_hand(hand)?;
        let waiting_tiles = winning_kinds(hand);
        Ok(TenpaiVerdict {
            is_tenpai: !waiting_tiles.is_empty(),
            waiting_tiles,
        })
    }
}
