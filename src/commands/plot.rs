//! Plot command handler.
//!
//! Reads a result CSV and renders the time and memory charts.

use crate::config::{BenchConfig, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::output;
use crate::plot;
use crate::results;
use std::path::{Path, PathBuf};

/// Resolve the CSV to plot: an explicit `--input` wins, otherwise the
/// config's `csv_path` (falling back to the default when no config exists).
fn resolve_input(input: Option<&Path>) -> PathBuf {
    if let Some(path) = input {
        return path.to_path_buf();
    }
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        match BenchConfig::load(config_path) {
            Ok(config) => return config.csv_path,
            Err(e) => output::print_warning(&format!(
                "ignoring unreadable {}: {}",
                CONFIG_FILE_NAME, e
            )),
        }
    }
    BenchConfig::default().csv_path
}

/// Render both charts from a result CSV into `out_dir`.
pub fn plot_command(input: Option<&Path>, out_dir: &Path) -> Result<()> {
    let csv_path = resolve_input(input);
    let rows = results::read_csv(&csv_path)?;

    let (time_path, memory_path) = plot::render_charts(&rows, out_dir)?;
    output::print_plot_saved(&time_path);
    output::print_plot_saved(&memory_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_prefers_explicit_path() {
        let path = resolve_input(Some(Path::new("custom.csv")));
        assert_eq!(path, PathBuf::from("custom.csv"));
    }
}
