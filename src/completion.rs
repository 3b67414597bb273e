//! Shell completion generation for luabench.
//!
//! Supports bash, zsh, and fish. The completion script is printed to stdout
//! so users can redirect it wherever their shell expects it.

use crate::error::{LuabenchError, Result};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Shells we can generate completion scripts for.
pub const SUPPORTED_SHELLS: [&str; 3] = ["bash", "zsh", "fish"];

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    /// Get the display name of the shell.
    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a shell type from a name or shell path (e.g. `zsh`, `/bin/zsh`).
pub fn parse_shell(shell: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell);

    match shell_name {
        "bash" => Ok(ShellType::Bash),
        "zsh" => Ok(ShellType::Zsh),
        "fish" => Ok(ShellType::Fish),
        _ => Err(LuabenchError::UnsupportedShell(shell_name.to_string())),
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        LuabenchError::ShellCompletion("$SHELL environment variable is not set".to_string())
    })?;
    parse_shell(&shell_path)
}

/// Build the clap Command structure for completion generation.
///
/// Mirrors the CLI defined in `main.rs` so clap_complete generates accurate
/// completion scripts.
fn build_cli() -> Command {
    Command::new("luabench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Benchmark harness comparing Lua-compatible interpreters")
        .subcommand(
            Command::new("init").about("Write a default luabench.toml scaffold").arg(
                clap::Arg::new("force")
                    .long("force")
                    .help("Overwrite an existing config file")
                    .action(clap::ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("run")
                .about("Run the full benchmark grid and write the result CSV")
                .arg(
                    clap::Arg::new("config")
                        .long("config")
                        .help("Path to the benchmark config file")
                        .default_value("luabench.toml")
                        .value_hint(clap::ValueHint::FilePath),
                )
                .arg(
                    clap::Arg::new("output")
                        .long("output")
                        .help("Override the CSV output path from the config")
                        .value_hint(clap::ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("plot")
                .about("Render line charts from a result CSV")
                .arg(
                    clap::Arg::new("input")
                        .long("input")
                        .help("Path to the result CSV")
                        .value_hint(clap::ValueHint::FilePath),
                )
                .arg(
                    clap::Arg::new("out-dir")
                        .long("out-dir")
                        .help("Directory to write the chart images into")
                        .default_value(".")
                        .value_hint(clap::ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script")
                .arg(clap::Arg::new("shell").value_parser(SUPPORTED_SHELLS)),
        )
}

/// Print the completion script for the given shell to stdout.
pub fn print_completion_script(shell: ShellType) {
    let mut cmd = build_cli();
    generate(
        shell.to_clap_shell(),
        &mut cmd,
        "luabench",
        &mut io::stdout(),
    );
}
