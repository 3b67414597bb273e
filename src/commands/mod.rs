//! CLI command handlers for luabench.
//!
//! - [`init`] - Write a default config scaffold
//! - [`run`] - Run the benchmark grid and persist the CSV
//! - [`plot`] - Render charts from a result CSV

mod init;
mod plot;
mod run;

pub use init::init_command;
pub use plot::plot_command;
pub use run::run_command;
