//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 --risk 0.1
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use glitchbomb::core::GameConfig;
use glitchbomb::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              GLITCH BOMB BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Risk threshold: {:.2}", config.risk_threshold);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--risk" => {
                if i + 1 < args.len() {
                    config.risk_threshold = args[i + 1].parse().unwrap_or(config.risk_threshold);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match GameConfig::load_json(Path::new(&args[i + 1])) {
                        Ok(game) => config.game = game,
                        Err(e) => eprintln!("Ignoring config {}: {}", args[i + 1], e),
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Glitch Bomb Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of sessions (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --risk <P>          Cash out above this lethal-draw chance (default: 0.25)");
    println!("    -c, --config <F>    JSON balance overrides");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
}
