use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuabenchError {
    #[error("Failed to launch interpreter {executable}: {source}")]
    Launch {
        executable: PathBuf,
        source: std::io::Error,
    },

    #[error("Trial exceeded timeout of {0} seconds")]
    Timeout(u64),

    #[error("Failed to remove workload file {path}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid result row: {0}")]
    InvalidCsv(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("No result rows to plot")]
    EmptyResults,

    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),
}

pub type Result<T> = std::result::Result<T, LuabenchError>;
