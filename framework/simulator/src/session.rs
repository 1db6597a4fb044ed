use scenario_lab_core::prelude::{Scenario, ScenarioError, ScenarioId};

/// Share of the progress bar covered by the steps. The rest is left for the verdict.
pub const STEP_PROGRESS_CAP: u8 = 80;
/// Progress shown while waiting for the verdict.
pub const FINALIZING_PROGRESS: u8 = 90;
/// Progress shown once the verdict has been written.
pub const COMPLETE_PROGRESS: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Advancing through the steps, one per tick.
    Stepping,
    /// All steps done, waiting for the verdict.
    Finalizing,
    /// The verdict has been written.
    Complete,
}

/// State of one in-flight run.
///
/// All transitions here are pure. Scheduling the timers that drive them is left to
/// [crate::simulator::Simulator].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSession {
    target: ScenarioId,
    store_generation: u64,
    step_count: usize,
    current_step_index: usize,
    progress_percent: u8,
    phase: Phase,
}

impl RunSession {
    /// Begin stepping through `scenario` at step 0.
    pub fn begin(scenario: &Scenario, store_generation: u64) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        Ok(Self {
            target: scenario.id().clone(),
            store_generation,
            step_count: scenario.steps().len(),
            current_step_index: 0,
            progress_percent: 0,
            phase: Phase::Stepping,
        })
    }

    /// Handle one tick. Moves to the next step, or into [Phase::Finalizing] after the last one.
    ///
    /// Has no effect outside of [Phase::Stepping].
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Stepping {
            return self.phase;
        }

        self.current_step_index += 1;
        if self.current_step_index < self.step_count {
            self.progress_percent = step_progress(self.current_step_index, self.step_count);
        } else {
            self.current_step_index = self.step_count;
            self.progress_percent = FINALIZING_PROGRESS;
            self.phase = Phase::Finalizing;
        }

        self.phase
    }

    /// Mark the verdict as written. Has no effect outside of [Phase::Finalizing].
    pub fn complete(&mut self) -> Phase {
        if self.phase == Phase::Finalizing {
            self.progress_percent = COMPLETE_PROGRESS;
            self.phase = Phase::Complete;
        }
        self.phase
    }

    pub fn target(&self) -> &ScenarioId {
        &self.target
    }

    pub fn store_generation(&self) -> u64 {
        self.store_generation
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Progress after `step` of `step_count` steps, scaled to [STEP_PROGRESS_CAP].
pub fn step_progress(step: usize, step_count: usize) -> u8 {
    if step_count == 0 {
        return 0;
    }
    let ratio = step.min(step_count) as f64 / step_count as f64;
    (ratio * f64::from(STEP_PROGRESS_CAP)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scenario_lab_core::prelude::Priority;

    fn scenario(steps: usize) -> Scenario {
        Scenario::new(
            "VA-001",
            "Colour contrast",
            "Visual",
            Priority::P1,
            (0..steps).map(|i| format!("step {i}")).collect(),
            "Contrast meets 4.5:1.",
        )
    }

    #[test]
    fn begins_at_step_zero() {
        let session = RunSession::begin(&scenario(3), 4).unwrap();

        assert_eq!(0, session.current_step_index());
        assert_eq!(0, session.progress_percent());
        assert_eq!(Phase::Stepping, session.phase());
        assert_eq!(4, session.store_generation());
    }

    #[test]
    fn empty_scenario_cannot_begin() {
        let err = RunSession::begin(&scenario(0), 1).unwrap_err();
        assert_eq!(ScenarioError::invalid(&"VA-001".into()), err);
    }

    #[test]
    fn walks_every_step_then_finalizes() {
        let mut session = RunSession::begin(&scenario(4), 1).unwrap();
        let mut seen = vec![(session.current_step_index(), session.progress_percent())];

        while session.advance() == Phase::Stepping {
            seen.push((session.current_step_index(), session.progress_percent()));
        }
        seen.push((session.current_step_index(), session.progress_percent()));

        assert_eq!(vec![(0, 0), (1, 20), (2, 40), (3, 60), (4, 90)], seen);
        assert_eq!(Phase::Finalizing, session.phase());

        // Further ticks are ignored
        assert_eq!(Phase::Finalizing, session.advance());
        assert_eq!(4, session.current_step_index());

        assert_eq!(Phase::Complete, session.complete());
        assert_eq!(100, session.progress_percent());
    }

    #[test]
    fn single_step_goes_straight_to_finalizing() {
        let mut session = RunSession::begin(&scenario(1), 1).unwrap();

        assert_eq!(Phase::Finalizing, session.advance());
        assert_eq!(1, session.current_step_index());
        assert_eq!(90, session.progress_percent());
    }

    #[test]
    fn complete_requires_finalizing() {
        let mut session = RunSession::begin(&scenario(2), 1).unwrap();

        assert_eq!(Phase::Stepping, session.complete());
        assert_eq!(0, session.progress_percent());
    }

    #[test]
    fn step_progress_rounds() {
        assert_eq!(27, step_progress(1, 3));
        assert_eq!(53, step_progress(2, 3));
        assert_eq!(11, step_progress(1, 7));
        assert_eq!(80, step_progress(5, 5));
        assert_eq!(0, step_progress(0, 0));
    }
}
