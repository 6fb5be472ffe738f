//! `sully doc`: generate HTML docs from docstrings with pdoc.

use std::io::Write;
use std::path::Path;

use crate::config::{ConfigOverrides, resolve_config};
use crate::uv::{ToolRunner, UvCommand};
use crate::{Error, Result};

/// Generate docs into the resolved output directory.
///
/// A failing pdoc run becomes [`Error::ToolFailed`] carrying pdoc's code.
pub fn doc(
    start: &Path,
    overrides: &ConfigOverrides,
    runner: &dyn ToolRunner,
    out: &mut dyn Write,
) -> Result<()> {
    let config = resolve_config(start, overrides)?;
    let output = config.doc_output();

    match runner.run(&UvCommand::pdoc(output))? {
        0 => {
            writeln!(out, "Docs written to {}/", output)?;
            Ok(())
        }
        code => Err(Error::ToolFailed {
            tool: "pdoc".to_string(),
            code,
        }),
    }
}
