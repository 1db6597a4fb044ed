use anyhow::Context;

use crate::Catalog;

/// Accessibility scenarios for the banking web and mobile channels.
pub const ACCESSIBILITY_CATALOG: &str = include_str!("../data/accessibility.toml");

/// The catalog shipped with Scenario Lab.
pub fn builtin() -> anyhow::Result<Catalog> {
    Catalog::from_toml_str(ACCESSIBILITY_CATALOG).context("Built-in accessibility catalog is invalid")
}
