use crate::scenario::ScenarioId;

/// Errors raised when a scenario is looked up in, or validated for, the [crate::store::ScenarioStore].
///
/// Both conditions are local and recoverable. Callers either ignore them, treating the run as
/// already cancelled, or surface a message to the user.
#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// The referenced scenario id is not present in the store.
    #[display("Scenario [{id}] not found")]
    NotFound { id: ScenarioId },
    /// The scenario cannot be run because it has no steps.
    #[display("Scenario [{id}] has no steps to run")]
    InvalidScenario { id: ScenarioId },
}

impl ScenarioError {
    pub fn not_found(id: &ScenarioId) -> Self {
        Self::NotFound { id: id.clone() }
    }

    pub fn invalid(id: &ScenarioId) -> Self {
        Self::InvalidScenario { id: id.clone() }
    }
}
