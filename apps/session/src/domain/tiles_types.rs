//! Core tile-related types: Suit, Honor, TileKind, TileId, Tile

use std::fmt;

use crate::domain::rules::KIND_COUNT;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Man,
    Pin,
    Sou,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Man, Suit::Pin, Suit::Sou];

    pub const fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
        }
    }

    const fn offset(self) -> usize {
        match self {
            Suit::Man => 0,
            Suit::Pin => 9,
            Suit::Sou => 18,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    pub const ALL: [Honor; 7] = [
        Honor::East,
        Honor::South,
        Honor::West,
        Honor::North,
        Honor::White,
        Honor::Green,
        Honor::Red,
    ];

    /// 1-based number used by the `"<n>z"` encoding.
    pub const fn number(self) -> u8 {
        match self {
            Honor::East => 1,
            Honor::South => 2,
            Honor::West => 3,
            Honor::North => 4,
            Honor::White => 5,
            Honor::Green => 6,
            Honor::Red => 7,
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Honor::East => "東",
            Honor::South => "南",
            Honor::West => "西",
            Honor::North => "北",
            Honor::White => "白",
            Honor::Green => "發",
            Honor::Red => "中",
        }
    }

    pub const fn is_dragon(self) -> bool {
        matches!(self, Honor::White | Honor::Green | Honor::Red)
    }
}

/// One of the 34 tile faces.
///
/// Ordering is man < pin < sou < honors, then rank; this is the display order
/// used by `sort_zone` and the deterministic deck order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TileKind {
    Number { suit: Suit, rank: u8 },
    Honor(Honor),
}

impl TileKind {
    /// Number tile, `None` unless `rank` is 1..=9.
    pub const fn number(suit: Suit, rank: u8) -> Option<TileKind> {
        if rank >= 1 && rank <= 9 {
            Some(TileKind::Number { suit, rank })
        } else {
            None
        }
    }

    /// Dense index 0..34 (1m..9m, 1p..9p, 1s..9s, East..Red).
    pub const fn index(self) -> usize {
        match self {
            TileKind::Number { suit, rank } => suit.offset() + (rank as usize - 1),
            TileKind::Honor(h) => 27 + (h.number() as usize - 1),
        }
    }

    pub fn from_index(index: usize) -> Option<TileKind> {
        match index {
            0..=26 => {
                let suit = Suit::ALL[index / 9];
                TileKind::number(suit, (index % 9) as u8 + 1)
            }
            27..=33 => Some(TileKind::Honor(Honor::ALL[index - 27])),
            _ => None,
        }
    }

    /// All 34 kinds in deck order.
    pub fn all() -> impl Iterator<Item = TileKind> {
        (0..KIND_COUNT).filter_map(TileKind::from_index)
    }

    pub const fn is_honor(self) -> bool {
        matches!(self, TileKind::Honor(_))
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, TileKind::Number { rank: 1 | 9, .. })
    }

    /// 2..=8 number tiles.
    pub const fn is_simple(self) -> bool {
        !self.is_honor() && !self.is_terminal()
    }

    /// Canonical wire code: `"5m"`, `"9s"`, `"1z"`..`"7z"`.
    pub fn code(self) -> String {
        match self {
            TileKind::Number { suit, rank } => format!("{rank}{}", suit.letter()),
            TileKind::Honor(h) => format!("{}z", h.number()),
        }
    }

    /// Display form: the code for number tiles, the kanji for honors.
    pub fn glyph(self) -> String {
        match self {
            TileKind::Number { .. } => self.code(),
            TileKind::Honor(h) => h.glyph().to_string(),
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Opaque per-session tile identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// A physical tile. Created once at deal time and never mutated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
}

/// Monotonic id source owned by a single session.
#[derive(Debug, Clone, Default)]
pub struct TileIdGen {
    next: u32,
}

impl TileIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, kind: TileKind) -> Tile {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        Tile { id, kind }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
