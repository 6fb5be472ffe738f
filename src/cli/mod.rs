//! CLI argument definitions for Sully.

use clap::{Parser, Subcommand};

use crate::commands::init::DEFAULT_PYTHON;
use crate::config::CheckMode;

/// Version line including build metadata, shown by `sully --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SULLY_GIT_COMMIT"),
    " ",
    env!("SULLY_BUILD_TIMESTAMP"),
    ")"
);

/// Sully - production-ready Python, from the first line.
///
/// Start with `sully init <name>`, then `sully run` inside the project.
#[derive(Parser, Debug)]
#[command(name = "sully")]
#[command(
    author,
    version,
    long_version = LONG_VERSION,
    about = "Production-ready Python from the first line: typed, tested, documented",
    long_about = None
)]
pub struct Cli {
    /// Show debug logging on stderr (SULLY_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print command summaries as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project with typing, tests and docs configured
    Init {
        /// Project (and directory) name
        name: String,

        /// Python version to pin
        #[arg(long, default_value = DEFAULT_PYTHON)]
        python: String,
    },

    /// Add dependencies
    Add {
        /// Packages to add (any uv requirement specifier)
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,

        /// Add to the dev dependency group
        #[arg(long, conflicts_with = "group")]
        dev: bool,

        /// Add to a named dependency group
        #[arg(long)]
        group: Option<String>,
    },

    /// Remove dependencies
    Remove {
        /// Packages to remove
        #[arg(required = true, num_args = 1..)]
        packages: Vec<String>,
    },

    /// Install all dependencies from the lockfile
    Sync,

    /// Run the type checker
    Check {
        /// Override [tool.sully.check] mode
        #[arg(long, value_enum)]
        mode: Option<CheckMode>,
    },

    /// Type-check, generate docs, then run the entry script
    ///
    /// Each gate must pass before the next step starts. The exit code is the
    /// failing gate's, or the script's own.
    Run {
        /// Skip the type-check gate
        #[arg(long)]
        no_check: bool,

        /// Skip the doc generation gate
        #[arg(long)]
        no_doc: bool,
    },

    /// Run tests, or generate test stubs from source
    Test {
        /// Write stub tests for public functions under src/
        #[arg(long)]
        generate: bool,

        /// Extra arguments passed to pytest
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },

    /// Generate HTML docs from docstrings
    Doc {
        /// Override [tool.sully.doc] output directory
        #[arg(long)]
        output: Option<String>,
    },

    /// Show resolved [tool.sully] settings and their sources
    Config,
}
