use anyhow::{anyhow, bail, Context};
use scenario_lab_catalog::{builtin, Catalog, Tab};
use scenario_lab_core::prelude::{ScenarioId, ShutdownHandle, ShutdownListener};
use scenario_lab_simulator::prelude::{
    ScenarioPanel, SeededRandom, Simulator, SimulatorConfig, TimerOutcome, TokioScheduler,
};

use crate::cli::ScenarioLabCli;
use crate::progress::RunProgress;
use crate::report::RunReport;
use crate::shutdown::start_shutdown_listener;

/// Load the catalog selected on the command line.
pub fn load_catalog(cli: &ScenarioLabCli) -> anyhow::Result<Catalog> {
    match &cli.catalog {
        Some(path) => Catalog::from_path(path),
        None => builtin(),
    }
}

/// Run the scenarios selected on the command line, stopping early on Ctrl-C.
pub fn run(cli: ScenarioLabCli) -> anyhow::Result<RunReport> {
    run_with_shutdown(cli, ShutdownHandle::default())
}

/// Run the scenarios selected on the command line, stopping early when `shutdown_handle` fires.
pub fn run_with_shutdown(
    cli: ScenarioLabCli,
    shutdown_handle: ShutdownHandle,
) -> anyhow::Result<RunReport> {
    let catalog = load_catalog(&cli)?;
    let tab = catalog.tab(&cli.tab).ok_or_else(|| {
        anyhow!(
            "Unknown tab [{}], available tabs are: {}",
            cli.tab,
            catalog.tab_ids().collect::<Vec<_>>().join(", ")
        )
    })?;
    let selection = select_scenarios(tab, &cli.scenario)?;

    let config = cli.simulator_config();
    config.validate()?;
    let random = match cli.seed {
        Some(seed) => SeededRandom::seeded(seed),
        None => SeededRandom::from_entropy(),
    };

    let session_id = nanoid::nanoid!();
    log::info!(
        "Session {session_id}: running {} scenarios from tab [{}]",
        selection.len(),
        tab.id
    );

    // A single thread drives every timer, like the event loop of the dashboard.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    let shutdown_listener = shutdown_handle.new_listener();
    // The handle is kept alive here, a closed channel would read as a shutdown request.
    start_shutdown_listener(&runtime, shutdown_handle.clone());

    let report = runtime.block_on(run_tab(
        session_id,
        tab,
        selection,
        config,
        random,
        !cli.no_progress,
        shutdown_listener,
    ));
    drop(shutdown_handle);

    report
}

fn select_scenarios(tab: &Tab, requested: &[String]) -> anyhow::Result<Vec<ScenarioId>> {
    if requested.is_empty() {
        return Ok(tab.scenarios.iter().map(|s| s.id().clone()).collect());
    }

    requested
        .iter()
        .map(|id| {
            let id = ScenarioId::from(id.as_str());
            if !tab.scenarios.iter().any(|s| s.id() == &id) {
                bail!("Scenario [{id}] is not in tab [{}]", tab.id);
            }
            Ok(id)
        })
        .collect()
}

async fn run_tab(
    session_id: String,
    tab: &Tab,
    selection: Vec<ScenarioId>,
    config: SimulatorConfig,
    random: SeededRandom,
    show_progress: bool,
    mut shutdown_listener: ShutdownListener,
) -> anyhow::Result<RunReport> {
    let (scheduler, mut events) = TokioScheduler::new();
    let simulator = Simulator::new(config, scheduler, random)?;
    let mut panel = ScenarioPanel::new(simulator);
    panel.load_tab(tab.scenarios.clone());

    let mut cancelled = false;
    for id in &selection {
        if shutdown_listener.should_shutdown() {
            cancelled = true;
            break;
        }

        panel.select(id)?;
        let progress = match panel.selected() {
            Some(scenario) => RunProgress::start(scenario, show_progress)?,
            None => bail!("Scenario [{id}] disappeared from tab [{}]", tab.id),
        };
        panel.run_selected()?;

        loop {
            tokio::select! {
                timer = events.next() => {
                    let Some(timer) = timer else {
                        bail!("Timer events stopped while scenario [{id}] was running");
                    };
                    match panel.on_timer(timer) {
                        TimerOutcome::Ignored => {}
                        TimerOutcome::Stepped { .. } | TimerOutcome::Finalizing => {
                            progress.update(panel.progress());
                        }
                        TimerOutcome::Completed(run) => {
                            progress.finish(&run);
                            break;
                        }
                        TimerOutcome::Aborted(reason) => {
                            progress.abandon(&reason.to_string());
                            break;
                        }
                    }
                }
                _ = shutdown_listener.wait_for_shutdown() => {
                    panel.cancel_run();
                    progress.abandon("cancelled");
                    log::warn!("Session {session_id}: cancelled run of [{id}]");
                    cancelled = true;
                    break;
                }
            }
        }

        if cancelled {
            break;
        }
    }

    let store = panel.teardown();
    let report = RunReport::new(session_id, &tab.label, &store, cancelled);
    log::info!("Session {}: {}", report.session_id, report.summary);

    Ok(report)
}
