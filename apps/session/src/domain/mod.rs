//! Domain layer: pure match logic types and helpers.

pub mod deck;
pub mod hand_shape;
pub mod opponent_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tiles_logic;
pub mod tiles_parsing;
pub mod tiles_serde;
pub mod tiles_types;
pub mod turns;
pub mod verdict;
pub mod zones;

pub mod match_transition;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_match_transition;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_snapshot_phases;
#[cfg(test)]
mod tests_turns;
#[cfg(test)]
mod tests_zone_props;

// Re-exports for ergonomics
pub use deck::{deal, deal_from_kinds, full_deck, shuffle_tiles, Deal};
pub use opponent_view::OpponentView;
pub use scoring::Score;
pub use snapshot::{snapshot, PhaseSnapshot, SessionSnapshot};
pub use state::{
    MatchSession, PendingCheck, PendingKind, Phase, Resolution, RoundIntent, RoundSetup,
    SessionFault, Side, Ticket, WinningInfo,
};
pub use tiles_parsing::{parse_compact, try_parse_kinds};
pub use tiles_types::{Honor, Suit, Tile, TileId, TileIdGen, TileKind};
pub use verdict::{TenpaiPattern, TenpaiVerdict, WaitingTile, WinQuery, WinVerdict};
pub use zones::{ZoneName, Zones};
