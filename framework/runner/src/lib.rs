mod cli;
mod init;
mod progress;
mod report;
mod run;
mod shutdown;

pub mod prelude {
    pub use crate::cli::ScenarioLabCli;
    pub use crate::init::init;
    pub use crate::report::{print_catalog, ResultRow, RunReport};
    pub use crate::run::{load_catalog, run, run_with_shutdown};
}
