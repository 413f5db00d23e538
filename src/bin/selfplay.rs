//! Self-play game generation CLI.
//!
//! Plays Boop games via self-play and outputs training data as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --max-turns N   Turn cap per game (default: 300)
//!   --retries N     Policy resample budget per move (default: 200)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --policy FILE   ONNX policy model (default: random policy)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::Arc;
use std::time::Instant;

use pounce::policy::{OnnxPolicy, Policy, RandomPolicy};
use pounce::selfplay::{self, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut policy_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = args[i].parse().expect("invalid --games value");
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = args[i].parse().expect("invalid --max-turns value");
            }
            "--retries" => {
                i += 1;
                config.max_retries = args[i].parse().expect("invalid --retries value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--policy" => {
                i += 1;
                policy_path = Some(args[i].clone());
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    let policy: Arc<dyn Policy> = match policy_path {
        Some(path) => Arc::new(OnnxPolicy::new(&path)),
        None => Arc::new(RandomPolicy::new(config.seed)),
    };

    if !quiet {
        eprintln!(
            "Self-play: {} games, max {} turns, {} retries, {} threads, seed {}",
            config.num_games, config.max_turns, config.max_retries, config.threads, config.seed,
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config, policy);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64() * 3600.0
        );
        selfplay::print_summary(&games);
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer).expect("failed to write output");
            if !quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).expect("failed to write output");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-turns N    Turn cap per game (default: 300)");
    eprintln!("  --retries N      Policy resample budget per move (default: 200)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --policy FILE    ONNX policy model (default: random policy)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress output");
    eprintln!("  --help           Show this help");
}
