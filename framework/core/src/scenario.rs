use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::error::ScenarioError;

/// Stable identifier of a scenario, for example `SR-002`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScenarioId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScenarioId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Priority of a scenario.
///
/// Catalogs are expected to use `P0`, `P1` or `P2` but any other label is accepted and kept as
/// [Priority::Other] so that it can still be displayed and run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    P0,
    P1,
    P2,
    Other(String),
}

impl Priority {
    pub fn parse(label: &str) -> Self {
        match label {
            "P0" => Priority::P0,
            "P1" => Priority::P1,
            "P2" => Priority::P2,
            other => Priority::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::Other(label) => label,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::parse(&value)
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.label().to_string()
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The status shown on a scenario card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    NotRun,
    Passed,
    Failed,
}

impl RunStatus {
    /// Badge text used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::NotRun => "NOT RUN",
            RunStatus::Passed => "PASS",
            RunStatus::Failed => "FAIL",
        }
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The verdict of a completed run. Unlike [RunStatus] this can never be "not run".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Passed,
    Failed,
}

impl From<Verdict> for RunStatus {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Passed => RunStatus::Passed,
            Verdict::Failed => RunStatus::Failed,
        }
    }
}

/// Duration of a simulated run, kept to a tenth of a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunDuration {
    tenths: u32,
}

impl RunDuration {
    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    /// Round a millisecond value to the nearest tenth of a second.
    pub fn from_millis_rounded(millis: u64) -> Self {
        let tenths = (millis + 50) / 100;
        Self {
            tenths: u32::try_from(tenths).unwrap_or(u32::MAX),
        }
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.tenths) * 100)
    }
}

impl Display for RunDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}s", self.tenths / 10, self.tenths % 10)
    }
}

/// The result fields of a scenario, always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    verdict: Verdict,
    actual: String,
    duration: RunDuration,
}

impl RunResult {
    pub fn new(verdict: Verdict, actual: impl Into<String>, duration: RunDuration) -> Self {
        Self {
            verdict,
            actual: actual.into(),
            duration,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn status(&self) -> RunStatus {
        self.verdict.into()
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn duration(&self) -> RunDuration {
        self.duration
    }
}

/// A documented manual test case together with the result of its latest simulated run.
///
/// Descriptive fields are fixed once the scenario is created. The result is only ever replaced
/// as a whole through [crate::store::ScenarioStore::replace_result], so a scenario is either
/// [RunStatus::NotRun] with no narrative and no duration, or carries all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    id: ScenarioId,
    name: String,
    category: String,
    priority: Priority,
    steps: Vec<String>,
    expected: String,
    test_data: Vec<(String, String)>,
    result: Option<RunResult>,
}

impl Scenario {
    pub fn new(
        id: impl Into<ScenarioId>,
        name: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        steps: Vec<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            priority,
            steps,
            expected: expected.into(),
            test_data: Vec::new(),
            result: None,
        }
    }

    /// Attach fixture data, such as the browser or screen reader under test.
    pub fn with_test_data(mut self, test_data: Vec<(String, String)>) -> Self {
        self.test_data = test_data;
        self
    }

    /// Check that the scenario can be run.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::invalid(&self.id));
        }
        Ok(())
    }

    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn priority(&self) -> &Priority {
        &self.priority
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn test_data(&self) -> &[(String, String)] {
        &self.test_data
    }

    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> RunStatus {
        self.result
            .as_ref()
            .map(RunResult::status)
            .unwrap_or(RunStatus::NotRun)
    }

    pub fn actual(&self) -> Option<&str> {
        self.result.as_ref().map(RunResult::actual)
    }

    pub fn last_run_duration(&self) -> Option<RunDuration> {
        self.result.as_ref().map(RunResult::duration)
    }

    pub(crate) fn set_result(&mut self, result: RunResult) {
        self.result = Some(result);
    }
}
