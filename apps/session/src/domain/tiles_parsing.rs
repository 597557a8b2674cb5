//! Tile parsing from string representations (e.g., "5m", "9s", "1z", "東")

use std::str::FromStr;

use super::tiles_types::{Honor, Suit, TileKind};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_err(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseTile, format!("Parse tile: {s}"))
}

fn honor_from_glyph(s: &str) -> Option<Honor> {
    match s {
        "東" => Some(Honor::East),
        "南" => Some(Honor::South),
        "西" => Some(Honor::West),
        "北" => Some(Honor::North),
        "白" => Some(Honor::White),
        // Both the traditional and simplified forms show up in fixtures.
        "發" | "発" => Some(Honor::Green),
        "中" => Some(Honor::Red),
        _ => None,
    }
}

impl FromStr for TileKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(h) = honor_from_glyph(trimmed) {
            return Ok(TileKind::Honor(h));
        }

        let mut chars = trimmed.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(parse_err(s));
        };
        let rank = rank_ch.to_digit(10).ok_or_else(|| parse_err(s))? as u8;

        match suit_ch {
            'm' => TileKind::number(Suit::Man, rank),
            'p' => TileKind::number(Suit::Pin, rank),
            's' => TileKind::number(Suit::Sou, rank),
            'z' if (1..=7).contains(&rank) => Some(TileKind::Honor(Honor::ALL[rank as usize - 1])),
            _ => None,
        }
        .ok_or_else(|| parse_err(s))
    }
}

/// Non-panicking helper to parse tile tokens into kinds.
/// Fails on the first invalid token.
pub fn try_parse_kinds<I, S>(tokens: I) -> Result<Vec<TileKind>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<TileKind>())
        .collect()
}

/// Parse a compact run such as `"123m456p99s11z"` into kinds, in order.
pub fn parse_compact(s: &str) -> Result<Vec<TileKind>, DomainError> {
    let mut out = Vec::new();
    let mut ranks: Vec<char> = Vec::new();
    for ch in s.chars().filter(|c| !c.is_whitespace()) {
        if ch.is_ascii_digit() {
            ranks.push(ch);
            continue;
        }
        if ranks.is_empty() {
            return Err(parse_err(s));
        }
        for r in ranks.drain(..) {
            out.push(format!("{r}{ch}").parse::<TileKind>()?);
        }
    }
    if !ranks.is_empty() {
        return Err(parse_err(s));
    }
    Ok(out)
}
