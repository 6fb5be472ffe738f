//! `sully check`: run pyright at the configured level.
//!
//! Unlike the gate in `sully run`, this ignores `check-before-run`; only
//! `mode = "off"` disables it.

use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::config::{ConfigOverrides, resolve_config};
use crate::uv::{ToolRunner, UvCommand};

/// Type-check the project. Returns pyright's exit code.
pub fn check(
    start: &Path,
    overrides: &ConfigOverrides,
    runner: &dyn ToolRunner,
    out: &mut dyn Write,
) -> Result<i32> {
    let config = resolve_config(start, overrides)?;
    let mode = config.check_mode();

    if mode.is_off() {
        writeln!(out, "Type checking is disabled (mode = 'off').")?;
        return Ok(0);
    }

    let code = runner.run(&UvCommand::pyright(mode))?;
    if code != 0 {
        writeln!(out, "Type errors found.")?;
    } else {
        writeln!(out, "All clear, no type errors.")?;
    }
    Ok(code)
}
