//! Terminal output formatting for luabench.
//!
//! Provides consistent, colored terminal output for the CLI: run banners,
//! per-row benchmark lines, and basic error/warning/info messages.

use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const MIN_BANNER_WIDTH: usize = 20;
const MAX_BANNER_WIDTH: usize = 80;

fn banner_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
        .clamp(MIN_BANNER_WIDTH, MAX_BANNER_WIDTH)
}

/// Print a phase banner: `━━━ PHASE ━━━`, centered to terminal width.
pub fn print_banner(phase: &str) {
    let label = format!(" {} ", phase);
    let label_len = label.chars().count();
    let remaining = banner_width().saturating_sub(label_len);
    let left = remaining / 2;
    let right = remaining - left;

    println!(
        "{CYAN}{BOLD}{}{}{}{RESET}",
        "━".repeat(left),
        label,
        "━".repeat(right)
    );
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    println!("{YELLOW}Warning:{RESET} {}", msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

/// Print one aggregated benchmark row as it lands.
///
/// Format mirrors the result table: mean time with 3 fraction digits, mean
/// peak memory with 1.
pub fn print_result_row(interpreter: &str, n: u64, time_ms: f64, peak_kb: f64) {
    println!(
        "{CYAN}[{:<7}]{RESET} n={:>7} | avg time = {BOLD}{:.3}{RESET} ms | peak memory = {BOLD}{:.1}{RESET} KB",
        interpreter, n, time_ms, peak_kb
    );
}

/// Print where the result table was written.
pub fn print_results_saved(path: &std::path::Path) {
    println!();
    println!("{GREEN}Results saved to{RESET} {}", path.display());
}

/// Print where a rendered chart was written.
pub fn print_plot_saved(path: &std::path::Path) {
    println!("{GREEN}Chart saved to{RESET} {}", path.display());
}

/// Progress bar across the whole (size, interpreter) trial grid.
pub fn trial_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.green} {pos}/{len} grid cells  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
