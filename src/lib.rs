//! Sully - production-ready Python, from the first line.
//!
//! This library provides the core functionality for the `sully` CLI tool:
//! project scaffolding, `[tool.sully]` configuration resolution, and the
//! type-check/doc-generation gates that guard `sully run`.

use std::path::PathBuf;

pub mod cli;
pub mod commands;
pub mod config;
pub mod gate;
pub mod logging;
pub mod stubs;
pub mod uv;


/// Library-level error type for Sully operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No pyproject.toml found in {} or any parent directory.", start.display())]
    ConfigNotFound { start: PathBuf },

    #[error(
        "No main script configured. Set [tool.sully] main = 'src/<package>/main.py' in pyproject.toml."
    )]
    NoMainScript,

    #[error("Invalid [tool.sully] configuration: {0}")]
    InvalidConfig(String),

    #[error("uv is not installed.")]
    UvNotFound,

    #[error("Directory '{0}' already exists.")]
    ProjectExists(String),

    #[error("No src/ directory found at {}.", .0.display())]
    NoSourceDir(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{tool} failed (exit code {code}).")]
    ToolFailed { tool: String, code: i32 },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// External tool failures keep the tool's own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Optional follow-up line shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::UvNotFound => Some(
                "Install it with: curl -LsSf https://astral.sh/uv/install.sh | sh\n\
                 Or see: https://docs.astral.sh/uv/getting-started/installation/",
            ),
            Error::ConfigNotFound { .. } => {
                Some("Run `sully init <name>` to create a project, or cd into one.")
            }
            _ => None,
        }
    }
}

/// Result type alias for Sully operations.
pub type Result<T> = std::result::Result<T, Error>;
