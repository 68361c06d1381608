//! Demo binary: run the naive protocol until it jams, then the corrected
//! protocol, and append both results to `results/metrics.csv`.

use std::time::Duration;

use dining_sim::tracing::setup_tracing;
use dining_sim::{run_simulation, CsvSink, RunReport, SimError, StrategyKind};
use tracing::info;

fn log_report(report: &RunReport) {
    info!(
        strategy = %report.strategy,
        elapsed_secs = report.elapsed.as_secs_f64(),
        total_meals = report.total_meals(),
        meals = ?report.meals,
        stalled = report.stalled,
        "run complete"
    );
}

#[tokio::main]
async fn main() -> Result<(), SimError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let sink = CsvSink::new("results/metrics.csv");

    info!("Running naive protocol (deadlock expected)");
    let naive = run_simulation(StrategyKind::Naive, Duration::from_secs(5)).await?;
    log_report(&naive);
    sink.append(&naive)?;

    info!("Running corrected protocol");
    let corrected = run_simulation(StrategyKind::Corrected, Duration::from_secs(10)).await?;
    log_report(&corrected);
    sink.append(&corrected)?;

    info!(path = %sink.path().display(), "Metrics saved");
    Ok(())
}
