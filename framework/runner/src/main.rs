use scenario_lab_runner::prelude::{init, load_catalog, print_catalog, run};

fn main() -> anyhow::Result<()> {
    let cli = init();

    if cli.list {
        print_catalog(&load_catalog(&cli)?);
        return Ok(());
    }

    let report = run(cli)?;
    report.print();

    Ok(())
}
