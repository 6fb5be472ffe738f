//! Dependency management through uv: `add`, `remove`, `sync`.

use serde::Serialize;

use crate::commands::{Output, json_string};
use crate::uv::{ToolRunner, UvCommand, run_checked};
use crate::{Error, Result};

/// Summary of a dependency change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepsReport {
    pub action: &'static str,
    pub packages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Output for DepsReport {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        match self.action {
            "sync" => "Dependencies synced.".to_string(),
            action => {
                let verb = if action == "add" { "Added" } else { "Removed" };
                match &self.group {
                    Some(group) => format!("{} {} ({})", verb, self.packages.join(", "), group),
                    None => format!("{} {}", verb, self.packages.join(", ")),
                }
            }
        }
    }
}

fn require_packages(packages: &[String]) -> Result<()> {
    if packages.is_empty() {
        return Err(Error::InvalidInput(
            "at least one package is required".to_string(),
        ));
    }
    Ok(())
}

/// `uv add`. `dev` takes priority over `group`.
pub fn add(
    runner: &dyn ToolRunner,
    packages: Vec<String>,
    dev: bool,
    group: Option<String>,
) -> Result<DepsReport> {
    require_packages(&packages)?;
    run_checked(runner, &UvCommand::add(&packages, dev, group.as_deref()))?;

    let group = if dev { Some("dev".to_string()) } else { group };
    Ok(DepsReport {
        action: "add",
        packages,
        group,
    })
}

/// `uv remove`.
pub fn remove(runner: &dyn ToolRunner, packages: Vec<String>) -> Result<DepsReport> {
    require_packages(&packages)?;
    run_checked(runner, &UvCommand::remove(&packages))?;
    Ok(DepsReport {
        action: "remove",
        packages,
        group: None,
    })
}

/// `uv sync`.
pub fn sync(runner: &dyn ToolRunner) -> Result<DepsReport> {
    run_checked(runner, &UvCommand::sync())?;
    Ok(DepsReport {
        action: "sync",
        packages: Vec::new(),
        group: None,
    })
}
