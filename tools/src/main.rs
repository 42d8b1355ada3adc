//! casino-runner: headless driver for the goose casino.
//!
//! Usage:
//!   casino-runner --steps 20 --seed 52
//!   casino-runner --steps 10 --config data/casino.json --json

use anyhow::Result;
use goose_casino_core::{
    config::CasinoConfig,
    simulation::{run_sim, SimulationOptions},
};
use std::env;
use std::io::{self, Write};

fn main() -> Result<()> {
    // Ledger writes are part of the operator-visible output.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ledger=info"))
        .init();

    let args: Vec<String> = env::args().collect();
    let steps = parse_arg(&args, "--steps", 20i64);
    let seed = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse::<u64>().ok());
    let quiet = args.iter().any(|a| a == "--quiet");
    let json = args.iter().any(|a| a == "--json");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => CasinoConfig::load(path)?,
        None => CasinoConfig::default(),
    };
    log::debug!(
        "loaded roster: {} players, {} geese",
        config.roster.players.len(),
        config.roster.geese.len()
    );

    let options = SimulationOptions { steps, seed, verbose: !quiet };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let report = run_sim(&options, &config, &mut handle)?;

    if json {
        writeln!(handle, "{}", serde_json::to_string_pretty(&report)?)?;
    }
    if let Some(reason) = &report.aborted {
        log::warn!("run ended early after {} steps: {reason}", report.steps_run);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
