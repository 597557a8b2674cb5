//! Match Simulator CLI - plays whole practice matches headlessly.
//!
//! Each match runs through the same `MatchService` an interactive client
//! uses, with an automatic player on the human side. The oracle adapter is
//! picked up from the `MAHJONG_*` environment like any other embedding.

mod metrics;
mod output;
mod simulator;
mod types;

use clap::Parser;
use mahjong_session::domain::Side;
use mahjong_session::SessionConfig;
use metrics::{build_match_metrics, winner_label};
use output::OutputWriter;
use simulator::{MatchResult, Simulator};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use types::{OpponentArg, OutputFormat};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Headless practice-match simulator")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Base seed; match N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent strategy
    #[arg(long, default_value = "tenpai")]
    opponent: OpponentArg,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Gzip the JSONL file
    #[arg(long)]
    compress: bool,
}

fn init_logging(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    let base = SessionConfig::from_env()?
        .with_opponent(args.opponent.kind())
        .with_opponent_delay(Duration::ZERO);
    info!(
        matches = args.matches,
        opponent = args.opponent.name(),
        oracle = ?base.oracle,
        "starting match simulator"
    );

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for match_no in 1..=args.matches {
        let seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(match_no - 1)),
            None => rand::random(),
        };
        let match_start = Instant::now();

        let outcome = match Simulator::new(base.clone().with_match_seed(seed)) {
            Ok(sim) => sim.simulate_match().await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                let duration_ms = match_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_match_metrics(
                    match_no,
                    seed,
                    args.opponent.name(),
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_match(&metrics) {
                    warn!(match_no, error = %e, "failed to write metrics");
                }
                debug!(
                    match_no,
                    seed,
                    rounds = result.rounds.len(),
                    winner = winner_label(result.winner),
                    "match completed"
                );
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(match_no, seed, error = %e, "match failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let jsonl_path = output_writer.jsonl_path().cloned();
    let csv_path = output_writer.csv_path().clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
    }
    print_summary(&results, errors, elapsed, args.matches);

    Ok(())
}

fn print_summary(results: &[MatchResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per match: {:?}",
        elapsed / results.len() as u32
    );

    let played = results.len() as f64;
    let player_wins = results
        .iter()
        .filter(|r| r.winner == Some(Side::Player))
        .count();
    let opponent_wins = results
        .iter()
        .filter(|r| r.winner == Some(Side::Opponent))
        .count();
    let rounds: usize = results.iter().map(|r| r.rounds.len()).sum();
    let draws: usize = results.iter().map(MatchResult::draws).sum();
    let faults: u32 = results.iter().map(|r| r.faults).sum();

    println!("\n=== Results ===");
    println!(
        "Player wins: {} ({:.1}%)",
        player_wins,
        player_wins as f64 / played * 100.0
    );
    println!(
        "Opponent wins: {} ({:.1}%)",
        opponent_wins,
        opponent_wins as f64 / played * 100.0
    );
    println!("Average rounds per match: {:.2}", rounds as f64 / played);
    if rounds > 0 {
        println!(
            "Drawn rounds: {} ({:.1}%)",
            draws,
            draws as f64 / rounds as f64 * 100.0
        );
    }
    if faults > 0 {
        println!("Session faults: {faults}");
    }
}
