//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze combat and loot balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 1000 explore battles on floor 1
//!   cargo run --bin simulate -- -n 200 -f 50 -t floor_boss
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use battle_engine::combat::BattleType;
use battle_engine::engine::BattleEngine;
use battle_engine::rewards::Division;
use battle_engine::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    let default_level = if options.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = options.config;
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BATTLE BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:        {}", config.num_battles);
    println!("  Floor:          {}", config.floor);
    println!("  Battle Type:    {}", config.battle_type);
    println!("  Division:       {}", config.division);
    println!("  Max Turns:      {}", config.max_turns);
    if let Some(monster) = &config.monster {
        println!("  Monster:        {}", monster);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let engine = BattleEngine::default();
    let report = match run_simulation(&engine, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if options.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Failed to write JSON report: {e}");
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

struct Options {
    config: SimConfig,
    json: bool,
    verbose: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{flag} expects a number, got '{raw}'"))
}

/// Start from the last preset named anywhere on the command line so that
/// explicit flags override it regardless of their position.
fn preset_config(args: &[String]) -> SimConfig {
    let defaults = SimConfig::default();
    let mut config = defaults.clone();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--boss" => config = SimConfig::boss_test(defaults.floor),
            "--loot" => config = SimConfig::loot_analysis(defaults.num_battles, defaults.floor),
            _ => {}
        }
    }
    config
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: preset_config(args),
        json: false,
        verbose: false,
    };
    let config = &mut options.config;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--battles" => {
                config.num_battles = parse_number(value(args, i, flag)?, flag)?;
                i += 1;
            }
            "-f" | "--floor" => {
                config.floor = parse_number(value(args, i, flag)?, flag)?;
                i += 1;
            }
            "-t" | "--type" => {
                config.battle_type = value(args, i, flag)?.parse::<BattleType>()?;
                i += 1;
            }
            "-d" | "--division" => {
                config.division = value(args, i, flag)?.parse::<Division>()?;
                i += 1;
            }
            "-m" | "--monster" => {
                config.monster = Some(value(args, i, flag)?.to_string());
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_number(value(args, i, flag)?, flag)?);
                i += 1;
            }
            "--max-turns" => {
                config.max_turns = parse_number(value(args, i, flag)?, flag)?;
                i += 1;
            }
            "--json" => options.json = true,
            "-v" | "--verbose" => options.verbose = true,
            "--boss" | "--loot" => {}
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option '{other}'")),
        }
        i += 1;
    }

    Ok(options)
}

fn print_help() {
    println!("Battle Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --battles <N>   Number of battles (default: 1000)");
    println!("    -f, --floor <F>     Floor to fight on (default: 1)");
    println!("    -t, --type <T>      floor_boss | explore | mimic | detected | pvp");
    println!("    -d, --division <D>  free | base | premium (default: base)");
    println!("    -m, --monster <ID>  Fight only this catalog monster");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --max-turns <T>     Turn cap per battle (default: 100)");
    println!("    --boss              Boss preset (200 floor_boss battles)");
    println!("    --loot              Loot preset (mimic battles, premium division)");
    println!("    -v, --verbose       Per-battle debug logging");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("Logging honours RUST_LOG, e.g. RUST_LOG=battle_engine=debug.");
}
