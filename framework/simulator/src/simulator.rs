use std::time::Duration;

use scenario_lab_core::prelude::{RunResult, ScenarioError, ScenarioId, ScenarioStore};

use crate::config::{ConfigError, SimulatorConfig};
use crate::outcome::synthesize;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{Phase, RunSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A run is already in flight. It was left untouched and the request was dropped.
    AlreadyRunning,
}

/// Why a run stopped without writing a result.
#[derive(derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    #[display("the scenario store was reloaded")]
    StoreReloaded,
    #[display("scenario [{_0}] is no longer in the store")]
    ScenarioMissing(ScenarioId),
}

/// A run that wrote its result to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub target: ScenarioId,
    pub step_count: usize,
    pub result: RunResult,
}

/// What happened when a timer was handed to [Simulator::on_timer].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Not the timer the simulator is waiting for, for example one that elapsed just as the run
    /// was cancelled.
    Ignored,
    /// Moved on to the next step.
    Stepped { current_step_index: usize, progress_percent: u8 },
    /// All steps done, waiting for the verdict.
    Finalizing,
    Completed(CompletedRun),
    /// The run was cancelled because its target went away.
    Aborted(AbortReason),
}

/// What a view needs to draw the progress bar and the step checklist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSnapshot {
    pub target: Option<ScenarioId>,
    /// `None` before a run has started.
    pub current_step_index: Option<usize>,
    pub progress_percent: u8,
    pub is_running: bool,
}

/// Animates a manual test run and writes a made-up verdict back to the store.
///
/// At most one run is in flight at a time. Every transition is triggered by a timer that the
/// simulator scheduled itself, and the simulator only ever has one timer pending. A fired timer
/// that does not match the pending one is ignored, so once [Simulator::cancel] returns nothing
/// from the cancelled run can touch the store.
pub struct Simulator<S: Scheduler, R: RandomSource> {
    config: SimulatorConfig,
    scheduler: S,
    random: R,
    session: Option<RunSession>,
    pending: Option<TimerId>,
}

impl<S: Scheduler, R: RandomSource> Simulator<S, R> {
    pub fn new(config: SimulatorConfig, scheduler: S, random: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            scheduler,
            random,
            session: None,
            pending: None,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&RunSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        match &self.session {
            Some(session) => RunSnapshot {
                target: Some(session.target().clone()),
                current_step_index: Some(session.current_step_index()),
                progress_percent: session.progress_percent(),
                is_running: true,
            },
            None => RunSnapshot::default(),
        }
    }

    /// Start a run of the scenario `id` held in `store`.
    ///
    /// Starting while a run is in flight is not an error. The request is ignored and the current
    /// run carries on as if nothing happened.
    pub fn start(
        &mut self,
        store: &ScenarioStore,
        id: &ScenarioId,
    ) -> Result<StartOutcome, ScenarioError> {
        if let Some(session) = &self.session {
            log::debug!(
                "Ignoring start of [{id}], a run of [{}] is already in flight",
                session.target()
            );
            return Ok(StartOutcome::AlreadyRunning);
        }

        let scenario = store.get(id)?;
        let session = RunSession::begin(scenario, store.generation())?;
        log::debug!(
            "Starting run of [{id}] with {} steps",
            session.step_count()
        );

        self.session = Some(session);
        self.schedule_tick();

        Ok(StartOutcome::Started)
    }

    /// Stop the run in flight, if any, without writing a result. Safe to call at any time.
    pub fn cancel(&mut self) -> bool {
        if let Some(timer) = self.pending.take() {
            self.scheduler.cancel(timer);
        }

        match self.session.take() {
            Some(session) => {
                log::debug!(
                    "Cancelled run of [{}] at step {}/{}",
                    session.target(),
                    session.current_step_index(),
                    session.step_count()
                );
                true
            }
            None => false,
        }
    }

    /// Handle an elapsed timer.
    pub fn on_timer(&mut self, timer: TimerId, store: &mut ScenarioStore) -> TimerOutcome {
        if self.pending != Some(timer) {
            log::trace!("Ignoring stale timer {timer:?}");
            return TimerOutcome::Ignored;
        }
        self.pending = None;

        let Some(session) = self.session.as_mut() else {
            return TimerOutcome::Ignored;
        };

        if session.store_generation() != store.generation() {
            return self.abort(AbortReason::StoreReloaded);
        }

        match session.phase() {
            Phase::Stepping if !store.contains(session.target()) => {
                let target = session.target().clone();
                self.abort(AbortReason::ScenarioMissing(target))
            }
            Phase::Stepping => match session.advance() {
                Phase::Stepping => {
                    let outcome = TimerOutcome::Stepped {
                        current_step_index: session.current_step_index(),
                        progress_percent: session.progress_percent(),
                    };
                    log::debug!(
                        "Run of [{}] at step {}/{} ({}%)",
                        session.target(),
                        session.current_step_index(),
                        session.step_count(),
                        session.progress_percent()
                    );
                    self.schedule_tick();
                    outcome
                }
                _ => {
                    log::debug!("Run of [{}] finished its steps", session.target());
                    self.schedule(self.config.finalize_delay);
                    TimerOutcome::Finalizing
                }
            },
            Phase::Finalizing => self.finalize(store),
            // finalize drops the session in the same call that completes it
            Phase::Complete => TimerOutcome::Ignored,
        }
    }

    fn finalize(&mut self, store: &mut ScenarioStore) -> TimerOutcome {
        let Some(session) = self.session.as_mut() else {
            return TimerOutcome::Ignored;
        };
        let target = session.target().clone();

        let random = &mut self.random;
        let result = match store.record_result(&target, |scenario| synthesize(scenario, random)) {
            Ok(result) => result,
            Err(_) => return self.abort(AbortReason::ScenarioMissing(target)),
        };
        session.complete();

        log::info!(
            "Run of [{target}] {} in {}: {}",
            result.status(),
            result.duration(),
            result.actual()
        );

        let step_count = session.step_count();
        self.session = None;

        TimerOutcome::Completed(CompletedRun {
            target,
            step_count,
            result,
        })
    }

    fn abort(&mut self, reason: AbortReason) -> TimerOutcome {
        if let Some(session) = &self.session {
            log::warn!("Abandoning run of [{}] because {reason}", session.target());
        }
        self.cancel();
        TimerOutcome::Aborted(reason)
    }

    fn schedule_tick(&mut self) {
        let (min_ms, max_ms) = self.config.tick_bounds_ms();
        let delay = Duration::from_millis(self.random.next_in_range(min_ms, max_ms));
        self.schedule(delay);
    }

    fn schedule(&mut self, delay: Duration) {
        if let Some(previous) = self.pending.replace(self.scheduler.schedule(delay)) {
            // Only one timer per run, replace rather than leak.
            self.scheduler.cancel(previous);
        }
    }
}

impl<S: Scheduler, R: RandomSource> Drop for Simulator<S, R> {
    fn drop(&mut self) {
        self.cancel();
    }
}
