//! Schema for the `[tool.sully]` table in pyproject.toml.
//!
//! This module provides:
//! - Rust structs mirroring the TOML table (every value optional, as written)
//! - Deserialization from a parsed `toml::Table`
//! - Validation
//!
//! Defaults are not applied here; see [`crate::config::resolver`].
//!
//! # TOML Schema
//!
//! ```toml
//! [tool.sully]
//! main = "src/myapp/main.py"
//!
//! [tool.sully.check]
//! mode = "strict"          # off | basic | strict
//! check-before-run = true
//!
//! [tool.sully.doc]
//! output = "docs"
//! doc-before-run = true
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Severity level handed to pyright via `--level`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Type checking disabled entirely
    Off,
    Basic,
    #[default]
    Strict,
}

impl CheckMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMode::Off => "off",
            CheckMode::Basic => "basic",
            CheckMode::Strict => "strict",
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, CheckMode::Off)
    }
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `[tool.sully.check]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CheckSection {
    pub mode: Option<CheckMode>,
    pub check_before_run: Option<bool>,
}

/// `[tool.sully.doc]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DocSection {
    /// Directory pdoc writes HTML into
    pub output: Option<String>,
    pub doc_before_run: Option<bool>,
}

/// The `[tool.sully]` table exactly as written in pyproject.toml.
///
/// Keys sully does not know about are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SullyConfig {
    /// Entry script run by `sully run`
    pub main: Option<String>,
    pub check: CheckSection,
    pub doc: DocSection,
}

impl SullyConfig {
    /// Build from the `[tool.sully]` table.
    pub fn from_table(table: toml::Table) -> Result<Self> {
        let config: SullyConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| Error::InvalidConfig(e.message().to_string()))?;
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(config)
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref main) = self.main {
            if main.trim().is_empty() {
                return Err("main must not be empty".to_string());
            }
        }
        if let Some(ref output) = self.doc.output {
            if output.trim().is_empty() {
                return Err("doc.output must not be empty".to_string());
            }
        }
        Ok(())
    }
}
