//! `sully config`: show the resolved `[tool.sully]` settings and where each
//! value came from.

use std::path::Path;

use serde::Serialize;

use crate::Result;
use crate::commands::{Output, json_string};
use crate::config::{ConfigOverrides, Resolved, ResolvedConfig, resolve_config};

/// One setting as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: Option<String>,
    pub source: String,
}

impl ConfigEntry {
    fn from_resolved<T: ToString>(key: &'static str, resolved: &Resolved<T>) -> Self {
        Self {
            key,
            value: Some(resolved.value.to_string()),
            source: resolved.source.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub pyproject: String,
    pub settings: Vec<ConfigEntry>,
}

impl ConfigReport {
    pub fn from_resolved(config: &ResolvedConfig) -> Self {
        let main = match &config.main {
            Some(resolved) => ConfigEntry::from_resolved("main", resolved),
            None => ConfigEntry {
                key: "main",
                value: None,
                source: "unset".to_string(),
            },
        };
        Self {
            pyproject: config.pyproject.display().to_string(),
            settings: vec![
                main,
                ConfigEntry::from_resolved("check.mode", &config.check_mode),
                ConfigEntry::from_resolved("check.check-before-run", &config.check_before_run),
                ConfigEntry::from_resolved("doc.output", &config.doc_output),
                ConfigEntry::from_resolved("doc.doc-before-run", &config.doc_before_run),
            ],
        }
    }
}

impl Output for ConfigReport {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let width = self.settings.iter().map(|e| e.key.len()).max().unwrap_or(0);
        let mut lines = vec![format!("Config: {}", self.pyproject)];
        for entry in &self.settings {
            let value = entry.value.as_deref().unwrap_or("(not set)");
            lines.push(format!(
                "  {:width$}  {}  [{}]",
                entry.key,
                value,
                entry.source,
                width = width
            ));
        }
        lines.join("\n")
    }
}

/// Resolve settings from `start` and report them.
pub fn show_config(start: &Path) -> Result<ConfigReport> {
    let config = resolve_config(start, &ConfigOverrides::default())?;
    Ok(ConfigReport::from_resolved(&config))
}
