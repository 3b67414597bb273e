use crate::error::{LuabenchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "luabench.toml";

// ============================================================================
// Benchmark Configuration
// ============================================================================

/// One interpreter executable under benchmark.
///
/// The executable must accept a single positional argument (the workload
/// script path) and exit on its own once the script completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpreter {
    /// Display name, also used as the `interpreter` column in the CSV.
    pub name: String,
    /// Path to the interpreter binary.
    pub path: PathBuf,
}

/// Configuration for a full benchmark run.
///
/// Replaces ad-hoc global constants with an explicit structure handed to
/// [`BenchRunner::new`](crate::bench::BenchRunner::new), so tests can point
/// the harness at stub executables.
///
/// # Serialization
///
/// Supports TOML via serde. Missing fields fall back to defaults that mirror
/// the stock benchmark (5 runs, the standard size ladder), so a minimal
/// config only needs an `[[interpreters]]` table per binary.
///
/// # Example
///
/// ```toml
/// runs = 5
/// sizes = [10, 50, 100, 500, 1000]
/// poll_interval_ms = 1
/// csv_path = "result/benchmark_results_recursive.csv"
///
/// [[interpreters]]
/// name = "lua"
/// path = "/usr/bin/lua"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Trials per (interpreter, size) pair. Must be at least 1.
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Workload input sizes, benchmarked in this exact order.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u64>,

    /// Memory sampling interval in milliseconds.
    ///
    /// Lower values catch shorter-lived peaks at the cost of more polling
    /// overhead. This is the precision/overhead knob of the whole harness.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Optional per-trial timeout in seconds. When set, a hung interpreter
    /// is killed and the trial fails instead of hanging the run.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Where the aggregated result table is written.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Directory the generated workload files are written into.
    #[serde(default = "default_workload_dir")]
    pub workload_dir: PathBuf,

    /// Interpreters under benchmark, measured in this exact order.
    #[serde(default)]
    pub interpreters: Vec<Interpreter>,
}

fn default_runs() -> u32 {
    5
}

fn default_sizes() -> Vec<u64> {
    vec![10, 50, 100, 500, 1000, 5000, 10000, 20000]
}

fn default_poll_interval_ms() -> u64 {
    1
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("result/benchmark_results_recursive.csv")
}

fn default_workload_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            sizes: default_sizes(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: None,
            csv_path: default_csv_path(),
            workload_dir: default_workload_dir(),
            interpreters: Vec::new(),
        }
    }
}

impl BenchConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LuabenchError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: BenchConfig = toml::from_str(&content)
            .map_err(|e| LuabenchError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save this config as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LuabenchError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check the config for logical consistency.
    ///
    /// # Validation Rules
    ///
    /// - `runs >= 1` (the averaging reducer divides by it)
    /// - `sizes` and `interpreters` must be non-empty
    /// - input sizes must be unique (each (interpreter, size) pair maps to
    ///   exactly one result row)
    /// - interpreter names must be unique (they key the CSV rows)
    /// - `poll_interval_ms >= 1`
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(LuabenchError::Config(
                "`runs` must be at least 1".to_string(),
            ));
        }
        if self.sizes.is_empty() {
            return Err(LuabenchError::Config(
                "`sizes` must list at least one input size".to_string(),
            ));
        }
        for (i, n) in self.sizes.iter().enumerate() {
            if self.sizes[..i].contains(n) {
                return Err(LuabenchError::Config(format!(
                    "duplicate input size: {}",
                    n
                )));
            }
        }
        if self.interpreters.is_empty() {
            return Err(LuabenchError::Config(
                "at least one `[[interpreters]]` entry is required".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(LuabenchError::Config(
                "`poll_interval_ms` must be at least 1".to_string(),
            ));
        }
        for (i, interp) in self.interpreters.iter().enumerate() {
            if interp.name.is_empty() {
                return Err(LuabenchError::Config(format!(
                    "interpreter #{} has an empty name",
                    i + 1
                )));
            }
            if self.interpreters[..i].iter().any(|other| other.name == interp.name) {
                return Err(LuabenchError::Config(format!(
                    "duplicate interpreter name: {}",
                    interp.name
                )));
            }
        }
        Ok(())
    }

    /// The memory sampling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// A starter config with a single system `lua` entry, written by `init`.
    pub fn scaffold() -> Self {
        Self {
            interpreters: vec![Interpreter {
                name: "lua".to_string(),
                path: PathBuf::from("/usr/bin/lua"),
            }],
            ..Self::default()
        }
    }
}
