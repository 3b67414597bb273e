//! Init command handler.
//!
//! Writes a starter `luabench.toml` in the working directory.

use crate::config::{BenchConfig, CONFIG_FILE_NAME};
use crate::error::{LuabenchError, Result};
use crate::output::{CYAN, GREEN, RESET};
use std::path::Path;

/// Write a default config scaffold.
///
/// Refuses to overwrite an existing config unless `force` is set, so a
/// stray `init` can't wipe a tuned interpreter list.
pub fn init_command(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(LuabenchError::Config(format!(
            "{} already exists (use --force to overwrite)",
            CONFIG_FILE_NAME
        )));
    }

    BenchConfig::scaffold().save(path)?;

    println!("  {GREEN}Created{RESET} {}", path.display());
    println!();
    println!(
        "Edit the {CYAN}[[interpreters]]{RESET} entries to point at the binaries you want to compare,"
    );
    println!("then run {CYAN}luabench run{RESET}.");
    Ok(())
}
