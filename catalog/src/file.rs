use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use scenario_lab_core::prelude::{Priority, Scenario, ScenarioId};

use crate::{Catalog, Tab};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    tabs: Vec<TabRecord>,
}

#[derive(Debug, Deserialize)]
struct TabRecord {
    id: String,
    label: String,
    #[serde(default)]
    scenarios: Vec<ScenarioRecord>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    id: ScenarioId,
    name: String,
    /// Defaults to the tab label.
    category: Option<String>,
    priority: Priority,
    steps: Vec<String>,
    expected: String,
    /// Kept in the order it is written in the file.
    #[serde(default)]
    test_data: toml::Table,
}

impl Catalog {
    /// Parse a catalog written in TOML.
    ///
    /// Every scenario starts out as not run. Scenarios without steps, duplicate scenario ids
    /// within a tab, and duplicate tab ids are rejected.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Catalog> {
        let file: CatalogFile = toml::from_str(input).context("Failed to parse catalog")?;

        let mut tab_ids = HashSet::new();
        let mut tabs = Vec::with_capacity(file.tabs.len());
        for tab in file.tabs {
            if !tab_ids.insert(tab.id.clone()) {
                bail!("Tab [{}] is defined more than once", tab.id);
            }
            tabs.push(tab.into_tab()?);
        }

        log::debug!("Loaded catalog with {} tabs", tabs.len());

        Ok(Catalog::new(tabs))
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_toml_str(&input)
            .with_context(|| format!("Invalid catalog file {}", path.display()))
    }
}

impl TabRecord {
    fn into_tab(self) -> anyhow::Result<Tab> {
        let mut ids = HashSet::new();
        let mut scenarios = Vec::with_capacity(self.scenarios.len());

        for record in self.scenarios {
            if !ids.insert(record.id.clone()) {
                bail!(
                    "Scenario [{}] is defined more than once in tab [{}]",
                    record.id,
                    self.id
                );
            }

            let scenario = Scenario::new(
                record.id,
                record.name,
                record.category.unwrap_or_else(|| self.label.clone()),
                record.priority,
                record.steps,
                record.expected,
            )
            .with_test_data(
                record
                    .test_data
                    .into_iter()
                    .map(|(key, value)| (key, display_value(value)))
                    .collect(),
            );
            scenario
                .validate()
                .with_context(|| format!("Invalid scenario in tab [{}]", self.id))?;

            scenarios.push(scenario);
        }

        Ok(Tab {
            id: self.id,
            label: self.label,
            scenarios,
        })
    }
}

fn display_value(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        toml::Value::Array(values) => values
            .into_iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        toml::Value::Table(table) => table
            .into_iter()
            .map(|(key, value)| format!("{key}: {}", display_value(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
