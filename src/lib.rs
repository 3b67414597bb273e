pub mod bench;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod output;
pub mod plot;
pub mod process;
pub mod results;
pub mod script;

pub use bench::{average, BenchRunner, TrialAverage};
pub use config::{BenchConfig, Interpreter};
pub use error::{LuabenchError, Result};
pub use process::{Measure, Measurement, SamplingMonitor};
pub use results::ResultRow;
