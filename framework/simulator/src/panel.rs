use scenario_lab_core::prelude::{Scenario, ScenarioError, ScenarioId, ScenarioStore, Summary};

use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};
use crate::session::COMPLETE_PROGRESS;
use crate::simulator::{RunSnapshot, Simulator, StartOutcome, TimerOutcome};

#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[display("No scenario is selected")]
    NothingSelected,
    #[display("{source}")]
    Scenario { source: ScenarioError },
}

impl From<ScenarioError> for PanelError {
    fn from(source: ScenarioError) -> Self {
        PanelError::Scenario { source }
    }
}

/// Progress as last drawn by the view.
///
/// Unlike [RunSnapshot] this survives the end of a run, so a finished run keeps showing all
/// steps done at 100% until the selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayedProgress {
    pub current_step_index: Option<usize>,
    pub progress_percent: u8,
}

impl DisplayedProgress {
    /// Whether step `index` should be ticked off in the checklist.
    pub fn is_step_done(&self, index: usize) -> bool {
        self.current_step_index.is_some_and(|current| current > index)
    }

    /// Whether step `index` is the one being worked on.
    pub fn is_step_active(&self, index: usize) -> bool {
        self.current_step_index == Some(index)
    }
}

/// The split panel of a dashboard tab: a list of scenarios, one of them selected, and a run
/// control for the selected one.
///
/// The panel owns the simulator and makes sure it is cancelled whenever the selection changes,
/// the tab is reloaded or the panel goes away.
pub struct ScenarioPanel<S: Scheduler, R: RandomSource> {
    store: ScenarioStore,
    simulator: Simulator<S, R>,
    selected: Option<ScenarioId>,
    displayed: DisplayedProgress,
}

impl<S: Scheduler, R: RandomSource> ScenarioPanel<S, R> {
    pub fn new(simulator: Simulator<S, R>) -> Self {
        Self {
            store: ScenarioStore::new(),
            simulator,
            selected: None,
            displayed: DisplayedProgress::default(),
        }
    }

    /// Show a new tab. Any run in flight is cancelled and the first scenario is selected.
    pub fn load_tab(&mut self, scenarios: Vec<Scenario>) {
        self.simulator.cancel();
        self.store.load(scenarios);
        self.selected = self.store.get_index(0).map(|s| s.id().clone());
        self.displayed = DisplayedProgress::default();
    }

    /// Select a scenario. Selecting a different one cancels the run in flight.
    pub fn select(&mut self, id: &ScenarioId) -> Result<(), PanelError> {
        if self.selected.as_ref() == Some(id) {
            return Ok(());
        }
        if !self.store.contains(id) {
            return Err(ScenarioError::not_found(id).into());
        }

        if self.simulator.cancel() {
            log::info!("Selection changed to [{id}], cancelled the run in flight");
        }
        self.selected = Some(id.clone());
        self.displayed = DisplayedProgress::default();

        Ok(())
    }

    /// Run the selected scenario.
    pub fn run_selected(&mut self) -> Result<StartOutcome, PanelError> {
        let id = self.selected.clone().ok_or(PanelError::NothingSelected)?;

        let outcome = self.simulator.start(&self.store, &id)?;
        if outcome == StartOutcome::Started {
            self.refresh_displayed();
        }

        Ok(outcome)
    }

    /// Hand an elapsed timer to the simulator.
    pub fn on_timer(&mut self, timer: TimerId) -> TimerOutcome {
        let outcome = self.simulator.on_timer(timer, &mut self.store);

        match &outcome {
            TimerOutcome::Ignored => {}
            TimerOutcome::Stepped { .. } | TimerOutcome::Finalizing => self.refresh_displayed(),
            TimerOutcome::Completed(run) => {
                self.displayed = DisplayedProgress {
                    current_step_index: Some(run.step_count),
                    progress_percent: COMPLETE_PROGRESS,
                };
            }
            TimerOutcome::Aborted(_) => self.displayed = DisplayedProgress::default(),
        }

        outcome
    }

    /// Cancel the run in flight, if any.
    pub fn cancel_run(&mut self) -> bool {
        let cancelled = self.simulator.cancel();
        if cancelled {
            self.displayed = DisplayedProgress::default();
        }
        cancelled
    }

    /// Close the panel, cancelling any run in flight.
    pub fn teardown(mut self) -> ScenarioStore {
        self.cancel_run();
        std::mem::take(&mut self.store)
    }

    pub fn store(&self) -> &ScenarioStore {
        &self.store
    }

    pub fn selected(&self) -> Option<&Scenario> {
        self.selected.as_ref().and_then(|id| self.store.get(id).ok())
    }

    pub fn selected_id(&self) -> Option<&ScenarioId> {
        self.selected.as_ref()
    }

    pub fn summary(&self) -> Summary {
        self.store.summary()
    }

    pub fn progress(&self) -> DisplayedProgress {
        self.displayed
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.simulator.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.simulator.is_running()
    }

    pub fn simulator(&self) -> &Simulator<S, R> {
        &self.simulator
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.simulator.scheduler_mut()
    }

    fn refresh_displayed(&mut self) {
        let snapshot = self.simulator.snapshot();
        self.displayed = DisplayedProgress {
            current_step_index: snapshot.current_step_index,
            progress_percent: snapshot.progress_percent,
        };
    }
}
