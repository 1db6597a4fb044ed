use itertools::Itertools;
use std::fmt::{Display, Formatter};

use crate::error::ScenarioError;
use crate::scenario::{RunResult, RunStatus, Scenario, ScenarioId};

/// Ordered collection of the scenarios shown on one dashboard tab.
///
/// The store is the only state shared between a view and the execution simulator. The view
/// loads and reads it; only the simulator writes results into it.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    generation: u64,
}

impl ScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    ///
    /// Every call bumps the [ScenarioStore::generation] so that a run started against the previous
    /// contents can tell that it is stale.
    pub fn load(&mut self, scenarios: Vec<Scenario>) {
        self.generation += 1;
        log::debug!(
            "Loaded {} scenarios into the store, generation {}",
            scenarios.len(),
            self.generation
        );
        self.scenarios = scenarios;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &ScenarioId) -> Result<&Scenario, ScenarioError> {
        self.scenarios
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| ScenarioError::not_found(id))
    }

    pub fn contains(&self, id: &ScenarioId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &ScenarioId) -> Option<usize> {
        self.scenarios.iter().position(|s| s.id() == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Overwrite the result of a scenario in place. Nothing else on the record changes.
    pub fn replace_result(
        &mut self,
        id: &ScenarioId,
        result: RunResult,
    ) -> Result<(), ScenarioError> {
        self.record_result(id, |_| result).map(|_| ())
    }

    /// Build a result from the current record of `id` and write it back in one lookup.
    pub fn record_result(
        &mut self,
        id: &ScenarioId,
        produce: impl FnOnce(&Scenario) -> RunResult,
    ) -> Result<RunResult, ScenarioError> {
        let scenario = self
            .scenarios
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| ScenarioError::not_found(id))?;
        let result = produce(scenario);
        scenario.set_result(result.clone());
        Ok(result)
    }

    /// Count scenarios by status. Always computed from the current records.
    pub fn summary(&self) -> Summary {
        let counts = self.scenarios.iter().counts_by(Scenario::status);
        let count = |status: RunStatus| counts.get(&status).copied().unwrap_or_default();

        Summary {
            total: self.scenarios.len(),
            passed: count(RunStatus::Passed),
            failed: count(RunStatus::Failed),
            not_run: count(RunStatus::NotRun),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
}

impl Summary {
    /// Share of executed scenarios that passed, if anything has been run yet.
    pub fn pass_rate(&self) -> Option<f64> {
        let executed = self.passed + self.failed;
        if executed == 0 {
            return None;
        }
        Some(self.passed as f64 / executed as f64)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total={} passed={} failed={} not_run={}",
            self.total, self.passed, self.failed, self.not_run
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Priority, RunDuration, Verdict};
    use pretty_assertions::assert_eq;

    fn scenario(id: &str) -> Scenario {
        Scenario::new(
            id,
            format!("Scenario {id}"),
            "Screen Reader",
            Priority::P0,
            vec!["a".to_string(), "b".to_string()],
            "Balance is announced.",
        )
    }

    fn passed() -> RunResult {
        RunResult::new(
            Verdict::Passed,
            "Balance is announced -- Verified successfully.",
            RunDuration::from_tenths(12),
        )
    }

    #[test]
    fn summary_of_fresh_load() {
        let mut store = ScenarioStore::new();
        store.load(vec![scenario("SR-001"), scenario("SR-002"), scenario("SR-003")]);

        assert_eq!(
            Summary {
                total: 3,
                passed: 0,
                failed: 0,
                not_run: 3,
            },
            store.summary()
        );
        assert_eq!(None, store.summary().pass_rate());
    }

    #[test]
    fn summary_follows_result_writes() {
        let mut store = ScenarioStore::new();
        store.load(vec![scenario("SR-001"), scenario("SR-002"), scenario("SR-003")]);

        store.replace_result(&"SR-002".into(), passed()).unwrap();

        assert_eq!(
            Summary {
                total: 3,
                passed: 1,
                failed: 0,
                not_run: 2,
            },
            store.summary()
        );
        assert_eq!(Some(1.0), store.summary().pass_rate());
        assert_eq!("total=3 passed=1 failed=0 not_run=2", store.summary().to_string());
    }

    #[test]
    fn replace_result_keeps_order_and_other_fields() {
        let mut store = ScenarioStore::new();
        store.load(vec![scenario("SR-001"), scenario("SR-002")]);
        let before = store.get(&"SR-002".into()).unwrap().clone();

        store.replace_result(&"SR-002".into(), passed()).unwrap();

        let after = store.get(&"SR-002".into()).unwrap();
        assert_eq!(Some(1), store.position(&"SR-002".into()));
        assert_eq!(before.name(), after.name());
        assert_eq!(before.steps(), after.steps());
        assert_eq!(before.expected(), after.expected());
        assert_eq!(RunStatus::Passed, after.status());
        assert_eq!(Some(RunDuration::from_tenths(12)), after.last_run_duration());
    }

    #[test]
    fn missing_scenario_is_not_found() {
        let mut store = ScenarioStore::new();
        store.load(vec![scenario("SR-001")]);

        let id = ScenarioId::from("SR-404");
        assert_eq!(Err(ScenarioError::not_found(&id)), store.get(&id).map(|_| ()));
        assert_eq!(
            Err(ScenarioError::not_found(&id)),
            store.replace_result(&id, passed())
        );
    }

    #[test]
    fn record_result_sees_the_record_it_replaces() {
        let mut store = ScenarioStore::new();
        store.load(vec![scenario("SR-001")]);

        let result = store
            .record_result(&"SR-001".into(), |scenario| {
                assert_eq!(RunStatus::NotRun, scenario.status());
                passed()
            })
            .unwrap();

        assert_eq!(passed(), result);
        assert_eq!(
            Some(&passed()),
            store.get(&"SR-001".into()).unwrap().result()
        );

        let id = ScenarioId::from("SR-404");
        assert_eq!(
            Err(ScenarioError::not_found(&id)),
            store.record_result(&id, |_| passed())
        );
    }

    #[test]
    fn load_replaces_contents_and_bumps_generation() {
        let mut store = ScenarioStore::new();
        assert_eq!(0, store.generation());

        store.load(vec![scenario("SR-001")]);
        store.replace_result(&"SR-001".into(), passed()).unwrap();
        store.load(vec![scenario("SR-001"), scenario("KB-001")]);

        assert_eq!(2, store.generation());
        assert_eq!(2, store.len());
        assert_eq!(
            RunStatus::NotRun,
            store.get(&"SR-001".into()).unwrap().status()
        );
    }
}
