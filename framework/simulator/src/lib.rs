mod config;
mod outcome;
mod panel;
mod random;
mod scheduler;
mod session;
mod simulator;
mod tokio_scheduler;

pub mod prelude {
    pub use crate::config::{
        ConfigError, SimulatorConfig, DEFAULT_FINALIZE_DELAY, DEFAULT_TICK_MAX, DEFAULT_TICK_MIN,
    };
    pub use crate::outcome::{pass_probability, synthesize, FAILURE_NARRATIVES, PASS_SUFFIX};
    pub use crate::panel::{DisplayedProgress, PanelError, ScenarioPanel};
    pub use crate::random::{RandomSource, SeededRandom};
    pub use crate::scheduler::{ManualScheduler, PendingTimer, Scheduler, TimerId};
    pub use crate::session::{
        step_progress, Phase, RunSession, COMPLETE_PROGRESS, FINALIZING_PROGRESS,
        STEP_PROGRESS_CAP,
    };
    pub use crate::simulator::{
        AbortReason, CompletedRun, RunSnapshot, Simulator, StartOutcome, TimerOutcome,
    };
    pub use crate::tokio_scheduler::{TimerEvents, TokioScheduler};
}
