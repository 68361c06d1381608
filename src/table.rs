//! # Table — the Simulation Harness
//!
//! The table owns one run end to end:
//!
//! 1. **Setup** — build N forks, N philosophers wired into a ring
//!    (`left = fork[i]`, `right = fork[(i + 1) % N]`), and, for the
//!    corrected protocol, one waiter with N-1 permits. Everything is
//!    constructed fresh per run; two runs share no state.
//! 2. **Running** — spawn every philosopher as its own task and sleep out
//!    the wall-clock budget. The philosophers never finish voluntarily.
//! 3. **Stopping** — request stop through the shared [`StopSignal`].
//! 4. **Stopped/TimedOut** — join the tasks under a bounded grace period.
//!    A philosopher parked inside the naive acquisition chain will never
//!    observe the signal; after the grace period the table abandons the
//!    stragglers (aborting their tasks) instead of hanging, and reports how
//!    many there were.
//!
//! Whatever happened during shutdown, the table always returns a
//! [`RunReport`] with the elapsed time and a snapshot of every meal
//! counter. A panicking philosopher is logged and does not abort the run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::fork::Fork;
use crate::philosopher::Philosopher;
use crate::strategy::{Corrected, DiningStrategy, Naive, StrategyKind};
use crate::waiter::Waiter;

/// Typed, cooperative cancellation request shared by the harness and every
/// philosopher of one run.
///
/// Philosophers poll it at phase boundaries only; requesting stop does not
/// interrupt an in-flight acquisition.
#[derive(Clone)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable result of one run, handed to the metrics sinks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name of the protocol that ran.
    pub strategy: String,
    /// Wall-clock time from setup to final counter snapshot.
    pub elapsed: Duration,
    /// Completed meals per seat, indexed by philosopher id.
    pub meals: Vec<u64>,
    /// Philosophers that never observed the stop signal within the grace
    /// period and were abandoned. Non-zero is the expected outcome of a
    /// deadlocked naive run.
    pub stalled: usize,
}

impl RunReport {
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().sum()
    }

    /// True when every philosopher exited on its own after the stop
    /// request.
    pub fn clean_shutdown(&self) -> bool {
        self.stalled == 0
    }
}

/// Harness for one ring of philosophers.
pub struct Table {
    config: SimConfig,
}

impl Table {
    /// Validates the configuration and creates the harness.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs one full simulation under `kind` and returns its report.
    ///
    /// This never fails and never hangs: budget expiry is the normal
    /// termination trigger, deadlocked philosophers are abandoned after the
    /// grace period, and the counters are snapshot-read regardless.
    pub async fn run(&self, kind: StrategyKind) -> RunReport {
        let n = self.config.seats;
        info!(
            strategy = kind.name(),
            seats = n,
            budget_secs = self.config.time_budget.as_secs_f64(),
            "simulation starting"
        );

        // Setup: fresh ring per run.
        let forks: Vec<Arc<Fork>> = (0..n).map(|i| Arc::new(Fork::new(i))).collect();
        let stop = StopSignal::new();
        let strategy: Arc<dyn DiningStrategy> = match kind {
            StrategyKind::Naive => Arc::new(Naive::new(self.config.grab_delay)),
            StrategyKind::Corrected => Arc::new(Corrected::new(Arc::new(Waiter::new(n - 1)))),
        };

        let start = Instant::now();
        let mut counters: Vec<Arc<AtomicU64>> = Vec::with_capacity(n);
        let mut seats = JoinSet::new();
        for i in 0..n {
            let philosopher = Philosopher::new(
                i,
                forks[i].clone(),
                forks[(i + 1) % n].clone(),
                stop.clone(),
                self.config.think,
                self.config.eat,
            );
            counters.push(philosopher.meal_counter());
            seats.spawn(philosopher.run(strategy.clone()));
        }

        // Running: the philosophers loop forever; only the budget ends it.
        tokio::time::sleep(self.config.time_budget).await;

        // Stopping.
        stop.request();
        info!(strategy = kind.name(), "budget expired, stop requested");

        // Stopped/TimedOut: bounded join, then abandon the stragglers.
        let stalled = self.join_with_grace(&mut seats).await;

        let elapsed = start.elapsed();
        let meals: Vec<u64> = counters
            .iter()
            .map(|c| c.load(Ordering::SeqCst))
            .collect();

        let report = RunReport {
            strategy: kind.name().to_string(),
            elapsed,
            meals,
            stalled,
        };
        info!(
            strategy = kind.name(),
            elapsed_secs = report.elapsed.as_secs_f64(),
            total_meals = report.total_meals(),
            stalled = report.stalled,
            "simulation finished"
        );
        report
    }

    /// Joins philosopher tasks until they are all done or the grace period
    /// runs out, returning how many had to be abandoned.
    async fn join_with_grace(&self, seats: &mut JoinSet<()>) -> usize {
        let deadline = tokio::time::Instant::now() + self.config.grace_period;
        loop {
            match tokio::time::timeout_at(deadline, seats.join_next()).await {
                Ok(Some(Ok(()))) => {}
                Ok(Some(Err(e))) => {
                    // One philosopher panicked; isolate it and keep joining
                    // the others.
                    error!(error = %e, "philosopher task failed");
                }
                Ok(None) => return 0,
                Err(_) => {
                    let stalled = seats.len();
                    warn!(
                        stalled,
                        "grace period exceeded, abandoning parked philosophers"
                    );
                    seats.abort_all();
                    return stalled;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_totals_and_shutdown_flag() {
        let report = RunReport {
            strategy: "corrected".to_string(),
            elapsed: Duration::from_secs(10),
            meals: vec![3, 4, 2, 5, 3],
            stalled: 0,
        };
        assert_eq!(report.total_meals(), 17);
        assert!(report.clean_shutdown());

        let stalled = RunReport { stalled: 5, ..report };
        assert!(!stalled.clean_shutdown());
    }

    #[test]
    fn stop_signal_latches() {
        let stop = StopSignal::new();
        assert!(!stop.is_requested());
        let observer = stop.clone();
        stop.request();
        assert!(observer.is_requested());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimConfig {
            seats: 1,
            ..SimConfig::default()
        };
        assert!(Table::new(config).is_err());
    }
}
