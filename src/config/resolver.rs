//! Single entry point for resolving `[tool.sully]` settings.
//!
//! ## Discovery
//!
//! The nearest `pyproject.toml` is found by walking up from the start
//! directory (normally the current working directory). Nothing is cached;
//! every command resolves afresh.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (`check --mode`, `doc --output`)
//! 2. `[tool.sully]` in pyproject.toml
//! 3. Built-in defaults
//!
//! Every value in [`ResolvedConfig`] is fully populated, so callers never
//! need to know the defaults.

use std::path::{Path, PathBuf};

use crate::config::schema::{CheckMode, SullyConfig};
use crate::{Error, Result};

/// File name searched for during discovery.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Default output directory for pdoc.
pub const DEFAULT_DOC_OUTPUT: &str = "docs";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from the pyproject.toml at this path
    File(PathBuf),
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::File(path) => write!(f, "file:{}", path.display()),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The pyproject.toml the settings were read from
    pub pyproject: PathBuf,
    /// Entry script (no default)
    pub main: Option<Resolved<String>>,
    pub check_mode: Resolved<CheckMode>,
    pub check_before_run: Resolved<bool>,
    pub doc_output: Resolved<String>,
    pub doc_before_run: Resolved<bool>,
}

impl ResolvedConfig {
    /// Apply defaults to a raw config read from `pyproject`.
    pub fn from_raw(pyproject: PathBuf, raw: SullyConfig, overrides: &ConfigOverrides) -> Self {
        let file = || ValueSource::File(pyproject.clone());

        let main = raw.main.map(|m| Resolved::new(m, file()));

        let check_mode = if let Some(mode) = overrides.check_mode {
            Resolved::new(mode, ValueSource::CliFlag)
        } else if let Some(mode) = raw.check.mode {
            Resolved::new(mode, file())
        } else {
            Resolved::new(CheckMode::default(), ValueSource::Default)
        };

        let check_before_run = match raw.check.check_before_run {
            Some(v) => Resolved::new(v, file()),
            None => Resolved::new(true, ValueSource::Default),
        };

        let doc_output = if let Some(ref output) = overrides.doc_output {
            Resolved::new(output.clone(), ValueSource::CliFlag)
        } else if let Some(output) = raw.doc.output {
            Resolved::new(output, file())
        } else {
            Resolved::new(DEFAULT_DOC_OUTPUT.to_string(), ValueSource::Default)
        };

        let doc_before_run = match raw.doc.doc_before_run {
            Some(v) => Resolved::new(v, file()),
            None => Resolved::new(true, ValueSource::Default),
        };

        Self {
            pyproject,
            main,
            check_mode,
            check_before_run,
            doc_output,
            doc_before_run,
        }
    }

    pub fn main(&self) -> Option<&str> {
        self.main.as_ref().map(|r| r.value.as_str())
    }

    pub fn check_mode(&self) -> CheckMode {
        self.check_mode.value
    }

    pub fn check_before_run(&self) -> bool {
        self.check_before_run.value
    }

    pub fn doc_output(&self) -> &str {
        &self.doc_output.value
    }

    pub fn doc_before_run(&self) -> bool {
        self.doc_before_run.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `sully check --mode`
    pub check_mode: Option<CheckMode>,
    /// `sully doc --output`
    pub doc_output: Option<String>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_mode(mut self, mode: CheckMode) -> Self {
        self.check_mode = Some(mode);
        self
    }

    pub fn with_doc_output(mut self, output: impl Into<String>) -> Self {
        self.doc_output = Some(output.into());
        self
    }
}

/// Walk up from `start` to find the nearest pyproject.toml.
pub fn find_pyproject(start: &Path) -> Result<PathBuf> {
    let start = start.canonicalize()?;
    for dir in start.ancestors() {
        let candidate = dir.join(PYPROJECT_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(Error::ConfigNotFound { start })
}

/// Directory holding the nearest pyproject.toml above `start`.
pub fn project_root(start: &Path) -> Result<PathBuf> {
    let pyproject = find_pyproject(start)?;
    Ok(pyproject
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

/// Parse `path` and return its `[tool.sully]` table (empty if absent).
pub fn load_table(path: &Path) -> Result<toml::Table> {
    let raw = std::fs::read_to_string(path)?;
    let mut doc: toml::Table = raw.parse()?;

    let Some(tool) = doc.remove("tool") else {
        return Ok(toml::Table::new());
    };
    let toml::Value::Table(mut tool) = tool else {
        return Err(Error::InvalidConfig("[tool] must be a table".to_string()));
    };
    match tool.remove("sully") {
        None => Ok(toml::Table::new()),
        Some(toml::Value::Table(sully)) => Ok(sully),
        Some(_) => Err(Error::InvalidConfig(
            "[tool.sully] must be a table".to_string(),
        )),
    }
}

/// Resolve configuration with full precedence chain.
///
/// Fails with [`Error::ConfigNotFound`] when no pyproject.toml exists in
/// `start` or any of its ancestors.
pub fn resolve_config(start: &Path, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let pyproject = find_pyproject(start)?;
    let raw = SullyConfig::from_table(load_table(&pyproject)?)?;
    tracing::debug!(path = %pyproject.display(), "resolved [tool.sully]");
    Ok(ResolvedConfig::from_raw(pyproject, raw, overrides))
}
