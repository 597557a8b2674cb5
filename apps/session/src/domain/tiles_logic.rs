//! Tile logic: dora successor, kind counting and display ordering

use super::rules::{COPIES_PER_KIND, KIND_COUNT};
use super::tiles_types::{Honor, Tile, TileKind};

/// Kind that scores as dora when `indicator` is revealed.
pub fn dora_from_indicator(indicator: TileKind) -> TileKind {
    match indicator {
        TileKind::Number { suit, rank } => TileKind::Number {
            suit,
            rank: if rank == 9 { 1 } else { rank + 1 },
        },
        TileKind::Honor(h) => TileKind::Honor(match h {
            Honor::East => Honor::South,
            Honor::South => Honor::West,
            Honor::West => Honor::North,
            Honor::North => Honor::East,
            Honor::White => Honor::Green,
            Honor::Green => Honor::Red,
            Honor::Red => Honor::White,
        }),
    }
}

/// Histogram of kinds indexed by `TileKind::index()`.
pub fn kind_counts<I>(kinds: I) -> [u8; KIND_COUNT]
where
    I: IntoIterator<Item = TileKind>,
{
    let mut counts = [0u8; KIND_COUNT];
    for k in kinds {
        counts[k.index()] = counts[k.index()].saturating_add(1);
    }
    counts
}

/// True when no kind appears more than four times.
pub fn within_copy_limit(counts: &[u8; KIND_COUNT]) -> bool {
    counts.iter().all(|&c| usize::from(c) <= COPIES_PER_KIND)
}

/// Stable sort by kind; ties keep their current relative order.
pub fn sort_by_kind(tiles: &mut [Tile]) {
    tiles.sort_by_key(|t| t.kind);
}

pub fn kinds_of(tiles: &[Tile]) -> Vec<TileKind> {
    tiles.iter().map(|t| t.kind).collect()
}
