//! Workload script generation.
//!
//! The workload is a tail-recursive Fibonacci written in Lua, parameterized
//! by the input size `n`. Every configured interpreter runs the exact same
//! file, so per-interpreter differences in the measurements come from the
//! runtime alone.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Lua source template; `{n}` is replaced with the input size.
const FIB_TEMPLATE: &str = "\
function fibt(n0, n1, c)
    if c == 0 then
        return n0
    else if c == 1 then
        return n1
    end
    return fibt(n1, n0+n1, c-1)
end
end

function fib(n)
    return fibt(0, 1, n)
end

fib({n})
";

/// Render the workload source for input size `n`.
pub fn render(n: u64) -> String {
    FIB_TEMPLATE.replace("{n}", &n.to_string())
}

/// File name of the workload for input size `n` within the workload dir.
pub fn file_name(n: u64) -> String {
    format!("script_{}.lua", n)
}

/// Write the workload for input size `n` into `dir`, overwriting any
/// previous file, and return its path.
pub fn write(dir: &Path, n: u64) -> Result<PathBuf> {
    let path = dir.join(file_name(n));
    fs::write(&path, render(n))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_substitutes_n() {
        let source = render(1000);
        assert!(source.contains("fib(1000)"));
        assert!(!source.contains("{n}"));
    }

    #[test]
    fn test_render_keeps_tail_call_shape() {
        let source = render(10);
        assert!(source.contains("function fibt(n0, n1, c)"));
        assert!(source.contains("return fibt(n1, n0+n1, c-1)"));
        assert!(source.contains("return fibt(0, 1, n)"));
    }

    #[test]
    fn test_file_name_embeds_size() {
        assert_eq!(file_name(50), "script_50.lua");
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), 42).unwrap();

        assert_eq!(path, dir.path().join("script_42.lua"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("fib(42)"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script_7.lua");
        fs::write(&path, "stale").unwrap();

        write(dir.path(), 7).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("fib(7)"));
        assert!(!content.contains("stale"));
    }
}
