//! Simulation binary: plays many headless games and reports win rates and
//! per-seat dice frequencies.
//!
//! Usage:
//!   cargo run --release --bin ludo-sim -- --games 1000 --players 4 --favored 2
//!
//! Set `RUST_LOG=ludo_engine=debug` to watch individual rolls and moves.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use ludo_engine::autoplay::GameRunner;
use ludo_engine::core::{CheatConfig, PlayerId, SessionConfig};

#[derive(Parser)]
#[command(name = "ludo-sim")]
#[command(about = "Run headless Ludo games and report outcomes")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Seats in rotation (2..=4); overrides the config file
    #[arg(long)]
    players: Option<usize>,

    /// Favour this seat with loaded dice (0 disables demo mode)
    #[arg(long)]
    favored: Option<u8>,

    /// Seed of the first game; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to a TOML session config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abandon a game after this many turns
    #[arg(long, default_value_t = GameRunner::DEFAULT_MAX_TURNS)]
    max_turns: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load_or_default(path)?,
        None => SessionConfig::default(),
    };
    if let Some(players) = args.players {
        config.player_count = players;
    }
    if let Some(favored) = args.favored {
        config.cheat = CheatConfig {
            enabled: favored != 0,
            favored_player: favored,
        };
    }
    config.validate()?;

    println!(
        "Playing {} games: {} players, favoured seat {}",
        args.games,
        config.player_count,
        config
            .cheat
            .favored()
            .map_or_else(|| "none".to_string(), |p| p.seat().to_string()),
    );

    let start = Instant::now();
    let runner = GameRunner::new(config.clone()).with_max_turns(args.max_turns);
    let report = runner.run_many(args.games, args.seed)?;
    let elapsed = start.elapsed();

    let names = config.resolved_names();
    println!();
    println!("=== RESULTS ===");
    for player in PlayerId::all(config.player_count) {
        let freq = report.face_frequencies(player);
        println!(
            "  {:<12} wins {:>6.1}%  captures {:>6}  faces [{}]",
            names[player.index()],
            report.win_rate(player) * 100.0,
            report.captures[player],
            freq.iter()
                .map(|f| format!("{:.3}", f))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    println!("  Unfinished:  {}", report.unfinished);
    println!("  Wall time:   {:.3}s", elapsed.as_secs_f64());

    Ok(())
}
