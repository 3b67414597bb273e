//! Run command handler.
//!
//! Loads the config, drives the full benchmark grid, and writes the
//! aggregated result table.

use crate::bench::BenchRunner;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::output::{self, BOLD, RESET};
use crate::results;
use std::path::Path;

/// Run the full benchmark and persist the CSV.
///
/// `output` overrides the config's `csv_path` when given.
pub fn run_command(config_path: &Path, output_path: Option<&Path>) -> Result<()> {
    let mut config = BenchConfig::load(config_path)?;
    if let Some(path) = output_path {
        config.csv_path = path.to_path_buf();
    }

    output::print_banner("BENCHMARK");
    let names: Vec<&str> = config
        .interpreters
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    output::print_info(&format!(
        "{BOLD}{}{RESET} interpreters ({}), {BOLD}{}{RESET} sizes, {BOLD}{}{RESET} runs each",
        names.len(),
        names.join(", "),
        config.sizes.len(),
        config.runs
    ));
    println!();

    let runner = BenchRunner::new(config);
    let rows = runner.run()?;

    results::write_csv(&rows, &runner.config().csv_path)?;
    output::print_results_saved(&runner.config().csv_path);
    Ok(())
}
