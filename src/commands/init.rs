//! `sully init`: scaffold a new typed Python project.
//!
//! Layout written under `<name>/`:
//!
//! ```text
//! pyproject.toml          [project], dev group, [tool.sully] tables
//! pyrightconfig.json      strict mode over src/
//! src/<pkg>/__init__.py
//! src/<pkg>/main.py       greet()/main() sample
//! src/<pkg>/py.typed
//! tests/test_main.py
//! .gitignore
//! README.md
//! ```
//!
//! `<pkg>` is the project name with `-` replaced by `_`. After the files are
//! in place, uv pins the Python version and syncs the environment.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::commands::{Output, json_string};
use crate::uv::{ToolRunner, UvCommand, run_checked};
use crate::{Error, Result};

/// Python version pinned when `--python` is not given.
pub const DEFAULT_PYTHON: &str = "3.12";

#[derive(Debug, Clone)]
pub struct InitOptions {
    pub name: String,
    pub python: String,
}

impl InitOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            python: DEFAULT_PYTHON.to_string(),
        }
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }
}

/// Summary of a created project.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub name: String,
    pub package: String,
    pub path: PathBuf,
    pub python: String,
}

impl Output for InitReport {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Created project '{}'.\n  cd {} && sully check",
            self.name, self.name
        )
    }
}

/// Importable package name for a project name.
pub fn package_name(name: &str) -> String {
    name.replace('-', "_")
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("project name must not be empty".to_string()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidInput(format!(
            "project name '{}' must be a plain directory name",
            name
        )));
    }
    Ok(())
}

/// Create the project under `parent` and set it up with uv.
pub fn init(parent: &Path, options: &InitOptions, runner: &dyn ToolRunner) -> Result<InitReport> {
    validate_name(&options.name)?;

    let root = parent.join(&options.name);
    if root.exists() {
        return Err(Error::ProjectExists(options.name.clone()));
    }
    runner.ensure_available()?;

    let pkg = package_name(&options.name);
    write_skeleton(&root, &options.name, &pkg, &options.python)?;
    tracing::debug!(root = %root.display(), "project skeleton written");

    run_checked(runner, &UvCommand::pin_python(&options.python).in_dir(&root))?;
    run_checked(runner, &UvCommand::sync().in_dir(&root))?;

    Ok(InitReport {
        name: options.name.clone(),
        package: pkg,
        path: root,
        python: options.python.clone(),
    })
}

fn write_skeleton(root: &Path, name: &str, pkg: &str, python: &str) -> Result<()> {
    let pkg_dir = root.join("src").join(pkg);
    std::fs::create_dir_all(&pkg_dir)?;
    std::fs::create_dir_all(root.join("tests"))?;

    std::fs::write(root.join("pyproject.toml"), pyproject_toml(name, pkg, python))?;

    let pyright = serde_json::json!({
        "include": ["src"],
        "typeCheckingMode": "strict",
        "pythonVersion": python,
    });
    std::fs::write(
        root.join("pyrightconfig.json"),
        serde_json::to_string_pretty(&pyright)? + "\n",
    )?;

    std::fs::write(
        pkg_dir.join("__init__.py"),
        format!("\"\"\"Top-level package for {}.\"\"\"\n", name),
    )?;
    std::fs::write(pkg_dir.join("main.py"), main_py(name))?;
    std::fs::write(pkg_dir.join("py.typed"), "")?;

    std::fs::write(root.join("tests").join("test_main.py"), test_main_py(pkg))?;
    std::fs::write(root.join(".gitignore"), GITIGNORE)?;
    std::fs::write(
        root.join("README.md"),
        format!(
            "# {}\n\nA sully project: typed, tested, documented from the start.\n",
            name
        ),
    )?;
    Ok(())
}

fn pyproject_toml(name: &str, pkg: &str, python: &str) -> String {
    format!(
        r#"[project]
name = "{name}"
version = "0.1.0"
description = "A sully project: typed, tested, documented."
requires-python = ">={python}"
dependencies = []

[dependency-groups]
dev = ["pyright", "pytest", "pdoc"]

[tool.sully]
main = "src/{pkg}/main.py"

[tool.sully.check]
mode = "strict"
check-before-run = true

[tool.sully.doc]
output = "docs"
"#
    )
}

fn main_py(name: &str) -> String {
    format!(
        r#""""{name} entry point."""


def greet(name: str = "world") -> str:
    """Return a greeting string."""
    return f"Hello, {{name}}!"


def main() -> None:
    """Run the application."""
    print(greet())


if __name__ == "__main__":
    main()
"#
    )
}

fn test_main_py(pkg: &str) -> String {
    format!(
        r#"from {pkg}.main import greet


def test_greet_default() -> None:
    assert greet() == "Hello, world!"


def test_greet_name() -> None:
    assert greet("sully") == "Hello, sully!"
"#
    )
}

const GITIGNORE: &str = "\
__pycache__/
*.py[cod]
*.egg-info/
dist/
build/
.venv/
docs/
.pytest_cache/
.mypy_cache/
.ruff_cache/
.DS_Store
";
