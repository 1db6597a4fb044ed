mod error;
mod scenario;
mod shutdown;
mod store;

pub mod prelude {
    pub use crate::error::ScenarioError;
    pub use crate::scenario::{
        Priority, RunDuration, RunResult, RunStatus, Scenario, ScenarioId, Verdict,
    };
    pub use crate::shutdown::{ShutdownHandle, ShutdownListener};
    pub use crate::store::{ScenarioStore, Summary};
}
