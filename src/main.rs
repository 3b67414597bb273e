//! luabench CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler.

use clap::{Parser, Subcommand};
use luabench::commands::{init_command, plot_command, run_command};
use luabench::completion::{detect_shell, parse_shell, print_completion_script, SUPPORTED_SHELLS};
use luabench::output::print_error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "luabench")]
#[command(
    version,
    about = "Benchmark harness comparing Lua-compatible interpreters on time and peak memory",
    after_help = "EXAMPLES:
    # Write a starter config, then point it at your interpreters
    luabench init

    # Run the full grid and write the result CSV
    luabench run
    luabench run --config bench.toml --output results.csv

    # Render time and memory charts from the CSV
    luabench plot
    luabench plot --input results.csv --out-dir charts/"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default luabench.toml scaffold
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Run the full benchmark grid and write the result CSV
    #[command(after_help = "EXAMPLES:
    luabench run                                  # Use ./luabench.toml
    luabench run --config bench.toml              # Explicit config
    luabench run --output results.csv             # Override the CSV path

BEHAVIOR:
    For every configured input size, a Fibonacci workload script is
    generated and each interpreter runs it N times sequentially. Wall-clock
    time and sampled peak resident memory are averaged per (interpreter,
    size) pair and appended to the CSV in configuration order.")]
    Run {
        /// Path to the benchmark config file
        #[arg(long, default_value = "luabench.toml")]
        config: PathBuf,

        /// Override the CSV output path from the config
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render line charts from a result CSV
    #[command(after_help = "EXAMPLES:
    luabench plot                                 # CSV path from config
    luabench plot --input results.csv --out-dir charts/

OUTPUT:
    Writes benchmark_time_plot.png and benchmark_memory_plot.png, each with
    one line series per interpreter.")]
    Plot {
        /// Path to the result CSV (defaults to the config's csv_path)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory to write the chart images into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Output shell completion script to stdout (hidden utility command)
    #[command(hide = true)]
    Completions {
        /// Shell type to generate completions for (bash, zsh, or fish).
        /// Detected from $SHELL when omitted.
        shell: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Init { force } => init_command(*force),
        Commands::Run { config, output } => run_command(config, output.as_deref()),
        Commands::Plot { input, out_dir } => plot_command(input.as_deref(), out_dir),
        Commands::Completions { shell } => match shell
            .as_deref()
            .map_or_else(detect_shell, parse_shell)
        {
            Ok(shell_type) => {
                print_completion_script(shell_type);
                Ok(())
            }
            Err(e) => {
                print_error(&format!(
                    "{}\nSupported shells: {}",
                    e,
                    SUPPORTED_SHELLS.join(", ")
                ));
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
