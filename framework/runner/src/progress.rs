use indicatif::{ProgressBar, ProgressStyle};
use scenario_lab_core::prelude::Scenario;
use scenario_lab_simulator::prelude::{CompletedRun, DisplayedProgress};

/// Progress bar for a single scenario run, mirroring the dashboard's progress bar and step list.
pub struct RunProgress {
    bar: ProgressBar,
    steps: Vec<String>,
}

impl RunProgress {
    pub fn start(scenario: &Scenario, enabled: bool) -> anyhow::Result<Self> {
        let bar = if enabled {
            ProgressBar::new(100)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} {prefix:.bold} [{wide_bar:.cyan/blue}] {pos:>3}% {msg}",
            )?
            .progress_chars("#>-"),
        );
        bar.set_prefix(scenario.id().to_string());

        let progress = Self {
            bar,
            steps: scenario.steps().to_vec(),
        };
        progress.update(DisplayedProgress {
            current_step_index: Some(0),
            progress_percent: 0,
        });

        Ok(progress)
    }

    pub fn update(&self, progress: DisplayedProgress) {
        self.bar.set_position(u64::from(progress.progress_percent));
        self.bar.set_message(self.step_message(progress));
    }

    pub fn finish(&self, run: &CompletedRun) {
        self.bar.set_position(100);
        self.bar.finish_with_message(format!(
            "{} in {}",
            run.result.status(),
            run.result.duration()
        ));
    }

    pub fn abandon(&self, reason: &str) {
        self.bar.abandon_with_message(reason.to_string());
    }

    fn step_message(&self, progress: DisplayedProgress) -> String {
        match progress.current_step_index {
            Some(index) if index < self.steps.len() => {
                format!("{}/{} {}", index + 1, self.steps.len(), self.steps[index])
            }
            Some(_) => "waiting for verdict".to_string(),
            None => String::new(),
        }
    }
}
