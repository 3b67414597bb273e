//! Result table persistence.
//!
//! One benchmark run produces one table with a row per (interpreter, size)
//! pair, written as CSV with the header `interpreter,n,time_ms,peak_kb`.
//! Rows are stored in the exact order they were produced, so the file
//! mirrors the configured iteration order.

use crate::error::{LuabenchError, Result};
use std::fs;
use std::path::Path;

/// One aggregated (interpreter, size, mean time, mean memory) record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub interpreter: String,
    pub n: u64,
    pub time_ms: f64,
    pub peak_kb: f64,
}

/// Column header of the result table.
pub const CSV_HEADER: [&str; 4] = ["interpreter", "n", "time_ms", "peak_kb"];

/// Write the result table to `path` as CSV.
///
/// The parent directory is created if absent. Times are written with 3
/// fraction digits, memory with 1, matching the row output printed during
/// the run.
pub fn write_csv(rows: &[ResultRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let n = row.n.to_string();
        let time_ms = format!("{:.3}", row.time_ms);
        let peak_kb = format!("{:.1}", row.peak_kb);
        writer.write_record([
            row.interpreter.as_str(),
            n.as_str(),
            time_ms.as_str(),
            peak_kb.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a result table back from CSV.
pub fn read_csv(path: &Path) -> Result<Vec<ResultRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != 4 {
            return Err(LuabenchError::InvalidCsv(format!(
                "expected 4 fields, got {}",
                record.len()
            )));
        }
        let field = |i: usize| record.get(i).unwrap_or_default();
        rows.push(ResultRow {
            interpreter: field(0).to_string(),
            n: field(1)
                .parse()
                .map_err(|_| LuabenchError::InvalidCsv(format!("bad n: {}", field(1))))?,
            time_ms: field(2)
                .parse()
                .map_err(|_| LuabenchError::InvalidCsv(format!("bad time_ms: {}", field(2))))?,
            peak_kb: field(3)
                .parse()
                .map_err(|_| LuabenchError::InvalidCsv(format!("bad peak_kb: {}", field(3))))?,
        });
    }

    Ok(rows)
}
