//! Command implementations for Sully CLI.
//!
//! This module contains the business logic for each CLI command:
//! - `init` - Scaffold a new typed Python project
//! - `deps` - `add` / `remove` / `sync` through uv
//! - `check` - Standalone pyright run
//! - `doc` - Standalone pdoc run
//! - `run` - Gated execution of the entry script
//! - `test` - pytest and test stub generation
//! - `config` - Show resolved settings
//!
//! Commands that launch tools take a [`ToolRunner`](crate::uv::ToolRunner)
//! and a writer for progress lines, and return the exit code to finish with.
//! Commands that only summarise their work return an [`Output`] value.

pub mod check;
pub mod config;
pub mod deps;
pub mod doc;
pub mod init;
pub mod run;

pub use check::check;
pub use config::{ConfigReport, show_config};
pub use deps::{DepsReport, add, remove, sync};
pub use doc::doc;
pub use init::{InitOptions, InitReport, init};
pub use run::{RunOptions, RunPlan, execute, run};
pub use self::test::{GenerateReport, generate_stubs, pytest};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// JSON rendering shared by the `Output` impls.
pub(crate) fn json_string<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}
