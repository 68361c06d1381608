//! # Dining Simulation
//!
//! A reproducible demonstration of deadlock — and of its cure — built on the
//! classic dining-philosophers problem. N philosopher tasks contend for N
//! forks arranged in a ring, under one of two acquisition protocols:
//!
//! - **naive**: everyone grabs left then right. The symmetric order on a
//!   cycle admits a circular wait, and the simulation is expected to jam.
//! - **corrected**: a waiter admits at most N-1 philosophers to the table at
//!   once, and seat parity flips the acquisition order. Either mechanism
//!   alone breaks the circular-wait precondition; together they guarantee
//!   every philosopher keeps eating.
//!
//! ## Module Tour
//!
//! - [`fork`] — the contended resource: a mutual-exclusion lock with an RAII
//!   guard and invariant instrumentation.
//! - [`waiter`] — the N-1 admission limiter of the corrected protocol.
//! - [`philosopher`] — the actor: one task per seat, a think/dine loop with
//!   cooperative cancellation at phase boundaries.
//! - [`strategy`] — the two protocols behind the [`DiningStrategy`] seam.
//! - [`table`] — the harness: builds the ring, enforces the wall-clock
//!   budget, abandons deadlocked tasks after a grace period, and snapshots
//!   the meal counters into a [`RunReport`].
//! - [`config`] — tunable ring size, budget, grace period, and pauses.
//! - [`report`] — metrics sinks (CSV rows, JSON run logs) consuming the
//!   harness output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use dining_sim::{run_simulation, StrategyKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dining_sim::SimError> {
//!     let report = run_simulation(StrategyKind::Naive, Duration::from_secs(5)).await?;
//!     println!(
//!         "{}: {} meals, {} philosophers stalled",
//!         report.strategy,
//!         report.total_meals(),
//!         report.stalled
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run both protocols with info logs
//! RUST_LOG=info cargo run
//! ```

pub mod config;
pub mod error;
pub mod fork;
pub mod philosopher;
pub mod report;
pub mod strategy;
pub mod table;
pub mod tracing;
pub mod waiter;

// Re-export core types for convenience
pub use config::{Pause, SimConfig};
pub use error::SimError;
pub use fork::{Fork, ForkGuard};
pub use philosopher::Philosopher;
pub use report::{CsvSink, RunLog};
pub use strategy::{Corrected, DiningStrategy, Naive, StrategyKind};
pub use table::{RunReport, StopSignal, Table};
pub use waiter::Waiter;

/// Runs one simulation with the default ring (five seats, classic timing)
/// under the given protocol and wall-clock budget.
///
/// This is the core's single entry point for collaborators: validate the
/// two inputs, run, and hand back the [`RunReport`] for rendering or
/// persistence.
pub async fn run_simulation(
    strategy: StrategyKind,
    time_budget: std::time::Duration,
) -> Result<RunReport, SimError> {
    let config = SimConfig {
        time_budget,
        ..SimConfig::default()
    };
    Ok(Table::new(config)?.run(strategy).await)
}
