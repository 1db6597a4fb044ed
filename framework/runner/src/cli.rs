use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use scenario_lab_simulator::prelude::SimulatorConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "scenario-lab", about, long_about = None)]
pub struct ScenarioLabCli {
    /// The catalog tab to run scenarios from
    #[clap(long, default_value = "screenReader")]
    pub tab: String,

    /// Load the catalog from a TOML file instead of using the built-in accessibility catalog
    #[clap(long)]
    pub catalog: Option<PathBuf>,

    /// Run only this scenario. Specify the flag multiple times to run several, for example
    /// `--scenario SR-001 --scenario SR-003`.
    ///
    /// Every scenario in the tab is run, in catalog order, when this is not set.
    #[clap(long, short)]
    pub scenario: Vec<String>,

    /// Seed for tick timing and verdicts, so that a session can be replayed
    #[clap(long)]
    pub seed: Option<u64>,

    /// Shortest delay between two steps, in milliseconds
    #[clap(long, default_value_t = 500)]
    pub tick_min_ms: u64,

    /// Longest delay between two steps, in milliseconds
    #[clap(long, default_value_t = 900)]
    pub tick_max_ms: u64,

    /// Pause between the last step and the verdict, in milliseconds
    #[clap(long, default_value_t = 600)]
    pub finalize_ms: u64,

    /// Do not show a progress bar on the CLI.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,

    /// List the tabs of the catalog and exit
    #[clap(long, default_value = "false")]
    pub list: bool,
}

impl ScenarioLabCli {
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::default()
            .with_tick_bounds(
                Duration::from_millis(self.tick_min_ms),
                Duration::from_millis(self.tick_max_ms),
            )
            .with_finalize_delay(Duration::from_millis(self.finalize_ms))
    }
}
