//! Configuration for Sully.
//!
//! Settings live in the `[tool.sully]` table of the project's pyproject.toml:
//!
//! - `main` - Entry script run by `sully run`
//! - `check.mode` - pyright level: "off", "basic" or "strict" (default "strict")
//! - `check.check-before-run` - Run the type-check gate before `sully run` (default true)
//! - `doc.output` - pdoc output directory (default "docs")
//! - `doc.doc-before-run` - Run the doc gate before `sully run` (default true)
//!
//! ## Precedence
//!
//! CLI flag > pyproject.toml > defaults
//!
//! Use the [`resolver`] module for unified precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, DEFAULT_DOC_OUTPUT, PYPROJECT_FILE, Resolved, ResolvedConfig, ValueSource,
    find_pyproject, load_table, project_root, resolve_config,
};
pub use schema::{CheckMode, CheckSection, DocSection, SullyConfig};
