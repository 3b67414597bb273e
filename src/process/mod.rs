//! Process observation for spawned interpreter runs.
//!
//! This module provides the resident-memory monitor for a child process and
//! the sampling measurement built on top of it.

mod monitor;
mod sample;

pub use monitor::ProcessMonitor;
pub use sample::{Measure, Measurement, SamplingMonitor};
