mod builtin;
mod file;

use scenario_lab_core::prelude::Scenario;

pub use builtin::{builtin, ACCESSIBILITY_CATALOG};

/// One dashboard tab and the scenarios it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub scenarios: Vec<Scenario>,
}

/// The scenarios available to the dashboards, grouped by tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    tabs: Vec<Tab>,
}

impl Catalog {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn tab_ids(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|tab| tab.id.as_str())
    }
}
