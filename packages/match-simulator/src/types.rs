//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Per-match JSON lines plus the CSV summary
    Jsonl,
    /// CSV summary only
    Csv,
}

/// Opponent strategy selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OpponentArg {
    Random,
    Tenpai,
}

impl OpponentArg {
    pub fn kind(self) -> mahjong_session::OpponentKind {
        match self {
            OpponentArg::Random => mahjong_session::OpponentKind::Random,
            OpponentArg::Tenpai => mahjong_session::OpponentKind::Tenpai,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpponentArg::Random => "random",
            OpponentArg::Tenpai => "tenpai",
        }
    }
}
