//! Game balance simulator CLI.
//!
//! Steps the live battle for a preset character and compares it with the
//! offline estimate.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # One hour of slimes
//!   cargo run --bin simulate -- -l 3 -s 600     # Ten minutes of orcs
//!   cargo run --bin simulate -- -l 5 --json     # JSON output

use idle_mmorpg::simulator::{run_simulation, SimConfig};
use idle_mmorpg::zones::Location;
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'simulate --help' for usage.");
            process::exit(1);
        }
    };

    let report = run_simulation(&config);

    if json {
        println!("{}", report.to_json());
        return;
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              IDLE MMORPG BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Location:       {}", config.location.display_name());
    println!("  Seconds:        {}", config.seconds);
    println!("  Level:          {}", config.level);
    println!("  Weapon Tier:    {}", config.weapon_tier);
    println!("  Armor Tier:     {}", config.armor_tier);
    println!("  Small Potions:  {}", config.small_potions);
    println!();
    println!("{}", report.to_text());
}

fn parse_location(raw: &str) -> Location {
    match raw.parse::<u32>() {
        Ok(tier) => Location::training_ground(tier),
        Err(_) => Location::new(raw),
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T, String> {
    let flag = &args[i];
    let raw = args
        .get(i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, raw))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seconds" => {
                config.seconds = parse_value(args, i)?;
                i += 1;
            }
            "-l" | "--location" => {
                let raw: String = parse_value(args, i)?;
                config.location = parse_location(&raw);
                i += 1;
            }
            "--level" => {
                config.level = parse_value(args, i)?;
                i += 1;
            }
            "--weapon" => {
                config.weapon_tier = parse_value(args, i)?;
                i += 1;
            }
            "--armor" => {
                config.armor_tier = parse_value(args, i)?;
                i += 1;
            }
            "--potions" => {
                config.small_potions = parse_value(args, i)?;
                i += 1;
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok((config, json))
}

fn print_help() {
    println!("Idle MMORPG Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --seconds <N>   Simulated seconds (default: 3600)");
    println!("    -l, --location <L>  Training ground tier 1-5 or location id (default: 1)");
    println!("    --level <N>         Starting level (default: 1)");
    println!("    --weapon <T>        Equip catalog weapon tier 1-5 (default: none)");
    println!("    --armor <T>         Equip catalog armor tier 1-5 (default: none)");
    println!("    --potions <N>       Small healing potions carried (default: 0)");
    println!("    --json              Print the report as JSON");
    println!("    -h, --help          Show this help");
}
