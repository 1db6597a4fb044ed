use crate::cli::ScenarioLabCli;
use clap::Parser;

/// Initialise the CLI and logging for the scenario lab runner.
pub fn init() -> ScenarioLabCli {
    env_logger::init();

    ScenarioLabCli::parse()
}
