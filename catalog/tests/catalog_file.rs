use std::io::Write;

use pretty_assertions::assert_eq;
use scenario_lab_catalog::Catalog;
use scenario_lab_core::prelude::{Priority, RunStatus};

const SAMPLE: &str = r#"
[[tabs]]
id = "mobile"
label = "Mobile Accessibility"

[[tabs.scenarios]]
id = "MB-001"
name = "VoiceOver reads the transfer confirmation"
priority = "P1"
steps = ["Open the transfer screen", "Confirm a transfer with VoiceOver"]
expected = "Confirmation is announced with amount and payee."

[tabs.scenarios.test_data]
device = "iPhone 15"
osVersion = 17
darkMode = true
gestures = ["swipe right", "double-tap"]
contrast = { text = "7:1", icons = "3:1" }

[[tabs.scenarios]]
id = "MB-002"
name = "TalkBack focus after login"
category = "Android"
priority = "P5"
steps = ["Log in with TalkBack enabled"]
expected = "Focus lands on the account summary heading."
"#;

#[test]
fn parse_catalog_file() {
    let catalog = Catalog::from_toml_str(SAMPLE).unwrap();

    let tab = catalog.tab("mobile").unwrap();
    assert_eq!("Mobile Accessibility", tab.label);
    assert_eq!(2, tab.scenarios.len());

    let first = &tab.scenarios[0];
    assert_eq!("MB-001", first.id().as_str());
    // Category falls back to the tab label
    assert_eq!("Mobile Accessibility", first.category());
    assert_eq!(&Priority::P1, first.priority());
    assert_eq!(RunStatus::NotRun, first.status());
    // Same order as written in the file
    assert_eq!(
        vec![
            ("device".to_string(), "iPhone 15".to_string()),
            ("osVersion".to_string(), "17".to_string()),
            ("darkMode".to_string(), "true".to_string()),
            ("gestures".to_string(), "swipe right, double-tap".to_string()),
            ("contrast".to_string(), "text: 7:1, icons: 3:1".to_string()),
        ],
        first.test_data().to_vec()
    );

    let second = &tab.scenarios[1];
    assert_eq!("Android", second.category());
    assert_eq!(&Priority::Other("P5".to_string()), second.priority());
    assert!(second.test_data().is_empty());
}

#[test]
fn load_catalog_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let catalog = Catalog::from_path(file.path()).unwrap();

    assert_eq!(vec!["mobile"], catalog.tab_ids().collect::<Vec<_>>());
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Catalog::from_path(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to read catalog file"));
}

#[test]
fn scenario_without_steps_is_rejected() {
    let input = r#"
[[tabs]]
id = "wcag"
label = "WCAG"

[[tabs.scenarios]]
id = "WC-001"
name = "Empty"
priority = "P0"
steps = []
expected = "Nothing"
"#;

    let err = Catalog::from_toml_str(input).unwrap_err();

    assert_eq!("Invalid scenario in tab [wcag]", err.to_string());
    assert_eq!(
        "Scenario [WC-001] has no steps to run",
        err.root_cause().to_string()
    );
}

#[test]
fn duplicate_scenario_ids_are_rejected() {
    let input = r#"
[[tabs]]
id = "wcag"
label = "WCAG"

[[tabs.scenarios]]
id = "WC-001"
name = "First"
priority = "P0"
steps = ["a"]
expected = "a"

[[tabs.scenarios]]
id = "WC-001"
name = "Second"
priority = "P0"
steps = ["b"]
expected = "b"
"#;

    let err = Catalog::from_toml_str(input).unwrap_err();

    assert!(err.to_string().contains("defined more than once"));
}

#[test]
fn duplicate_tab_ids_are_rejected() {
    let input = r#"
[[tabs]]
id = "wcag"
label = "WCAG"

[[tabs]]
id = "wcag"
label = "WCAG again"
"#;

    let err = Catalog::from_toml_str(input).unwrap_err();

    assert_eq!("Tab [wcag] is defined more than once", err.to_string());
}

#[test]
fn malformed_catalog_is_rejected() {
    let err = Catalog::from_toml_str("tabs = 5").unwrap_err();

    assert_eq!("Failed to parse catalog", err.to_string());
}
