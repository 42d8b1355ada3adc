//! The simulation driver: seed, register the roster, step, report.
//!
//! Output is human-readable text written to the caller's sink.
//! Validation errors (bad config) are returned to the caller. Any other
//! failure mid-run is written as an error line and logged, and the run
//! ends with a report marked as aborted.

use crate::{
    config::CasinoConfig,
    engine::Casino,
    error::CasinoResult,
    player::Player,
    rng::{CasinoRng, RandomSource},
    types::{Amount, EntityName},
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Negative counts are reported and nothing is stepped.
    pub steps:   i64,
    /// None draws a fresh seed (logged, and kept in the report).
    pub seed:    Option<u64>,
    /// Print the roster up front and the final ledgers and statistics.
    pub verbose: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self { steps: 20, seed: None, verbose: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub seed:            Option<u64>,
    pub requested_steps: i64,
    pub steps_run:       u64,
    pub rich_players:    usize,
    pub total_players:   usize,
    pub richest_player:  Option<Player>,
    pub top_goose:       Option<(EntityName, Amount)>,
    pub final_balances:  Vec<(EntityName, Amount)>,
    pub goose_income:    Vec<(EntityName, Amount)>,
    pub aborted:         Option<String>,
}

impl SimulationReport {
    fn new(seed: Option<u64>, requested_steps: i64) -> Self {
        Self {
            seed,
            requested_steps,
            steps_run:      0,
            rich_players:   0,
            total_players:  0,
            richest_player: None,
            top_goose:      None,
            final_balances: Vec::new(),
            goose_income:   Vec::new(),
            aborted:        None,
        }
    }

    fn capture(&mut self, casino: &Casino) {
        self.rich_players = casino.players().players_with_balance().len();
        self.total_players = casino.players().len();
        self.richest_player = casino.richest_player().cloned();
        self.top_goose = casino
            .goose_income()
            .top_entry()
            .map(|(name, income)| (name.to_string(), income));
        self.final_balances = casino.balances().to_pairs();
        self.goose_income = casino.goose_income().to_pairs();
    }
}

/// Run a full simulation on a seeded PCG stream.
pub fn run_sim(
    options: &SimulationOptions,
    config: &CasinoConfig,
    out: &mut dyn Write,
) -> CasinoResult<SimulationReport> {
    let rng = match options.seed {
        Some(seed) => CasinoRng::new(seed),
        None => CasinoRng::from_entropy(),
    };
    let seed = rng.seed();
    run_with_source(options, config, Box::new(rng), Some(seed), out)
}

/// Run a full simulation on any random source. `seed` is only recorded.
pub fn run_with_source(
    options: &SimulationOptions,
    config: &CasinoConfig,
    rng: Box<dyn RandomSource>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> CasinoResult<SimulationReport> {
    let mut casino = Casino::build(config, rng)?;
    let mut report = SimulationReport::new(seed, options.steps);

    let result = drive(&mut casino, options, out, &mut report);
    report.capture(&casino);

    match result {
        Ok(()) => Ok(report),
        Err(e) if e.is_validation() => Err(e),
        Err(e) => {
            log::error!("simulation aborted after {} steps: {e}", report.steps_run);
            // The sink may be what failed; the log line above still stands.
            let _ = writeln!(out, "Simulation error: {e}");
            report.aborted = Some(e.to_string());
            Ok(report)
        }
    }
}

fn drive(
    casino: &mut Casino,
    options: &SimulationOptions,
    out: &mut dyn Write,
    report: &mut SimulationReport,
) -> CasinoResult<()> {
    let seed_label = options
        .seed
        .map_or_else(|| "none".to_string(), |s| s.to_string());
    writeln!(
        out,
        "=== Simulation start (steps: {}, seed: {seed_label}) ===",
        options.steps
    )?;

    if options.verbose {
        writeln!(out, "\nPlayers: {}", casino.players())?;
        writeln!(out, "Geese: {}", casino.geese())?;
        writeln!(out, "Balances: {}", casino.balances())?;
        writeln!(out, "Goose income: {}", casino.goose_income())?;
    }

    if options.steps < 0 {
        log::warn!("negative step count {}", options.steps);
        writeln!(
            out,
            "\nStep count is negative ({}); nothing to simulate.",
            options.steps
        )?;
    } else {
        writeln!(out, "\n=== Simulation run ===")?;
        for i in 0..options.steps {
            writeln!(out, "\nStep {}:", i + 1)?;
            let outcome = casino.step()?;
            report.steps_run += 1;
            writeln!(out, "  {outcome}")?;
        }
    }

    if options.verbose {
        write_summary(casino, out)?;
    }
    Ok(())
}

fn write_summary(casino: &Casino, out: &mut dyn Write) -> CasinoResult<()> {
    writeln!(out, "\n=== Simulation results ===")?;
    writeln!(out, "Final balances: {}", casino.balances())?;
    writeln!(out, "Goose income: {}", casino.goose_income())?;

    writeln!(out, "\n=== Statistics ===")?;
    writeln!(
        out,
        "Players with money: {} of {}",
        casino.players().players_with_balance().len(),
        casino.players().len()
    )?;
    if let Some(richest) = casino.richest_player() {
        writeln!(
            out,
            "Richest player: {} with balance {}",
            richest.name, richest.balance
        )?;
    }
    if let Some((name, income)) = casino.goose_income().top_entry() {
        writeln!(out, "Most successful goose: {name} with income {income}")?;
    }
    Ok(())
}
