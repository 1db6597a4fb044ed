use scenario_lab_catalog::Catalog;
use scenario_lab_core::prelude::{ScenarioStore, Summary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Actual")]
    pub actual: String,
}

#[derive(Tabled)]
struct TabRow {
    #[tabled(rename = "Tab")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Scenarios")]
    scenarios: usize,
}

/// Outcome of one runner session over a catalog tab.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Unique per session, to tell sessions apart in the logs.
    pub session_id: String,
    pub tab: String,
    pub rows: Vec<ResultRow>,
    pub summary: Summary,
    /// Set if a shutdown signal cut the session short.
    pub cancelled: bool,
}

impl RunReport {
    pub(crate) fn new(session_id: String, tab: &str, store: &ScenarioStore, cancelled: bool) -> Self {
        let rows = store
            .scenarios()
            .iter()
            .map(|scenario| ResultRow {
                id: scenario.id().to_string(),
                priority: scenario.priority().to_string(),
                status: scenario.status().to_string(),
                time: scenario
                    .last_run_duration()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                actual: scenario.actual().unwrap_or("-").to_string(),
            })
            .collect();

        Self {
            session_id,
            tab: tab.to_string(),
            rows,
            summary: store.summary(),
            cancelled,
        }
    }

    pub fn print(&self) {
        println!("\nResults for {}", self.tab);

        let mut table = Table::new(&self.rows);
        table.with(Style::modern());
        println!("{}", table);

        match self.summary.pass_rate() {
            Some(rate) => println!("{} pass_rate={:.1}%", self.summary, rate * 100.0),
            None => println!("{}", self.summary),
        }
        if self.cancelled {
            println!("Session was cancelled before all scenarios ran");
        }
    }
}

/// Print the tabs of a catalog.
pub fn print_catalog(catalog: &Catalog) {
    let rows = catalog
        .tabs()
        .iter()
        .map(|tab| TabRow {
            id: tab.id.clone(),
            label: tab.label.clone(),
            scenarios: tab.scenarios.len(),
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    println!("{}", table);
}
