//! # Philosopher
//!
//! One philosopher is one concurrent unit of execution: a loop that thinks,
//! dines under the selected protocol, and repeats until the harness requests
//! stop. The loop never terminates on its own — budget expiry at the harness
//! is the only planned exit.
//!
//! ## Cancellation model
//!
//! The stop signal is checked cooperatively, only *between* phases: before
//! thinking and before a dine attempt (the corrected protocol re-checks once
//! more after the waiter admits it). It is deliberately **not** checked
//! mid-acquisition: a philosopher parked on a fork that will never be
//! released cannot observe anything, which is precisely the deadlock the
//! naive protocol exists to demonstrate. The harness abandons such
//! philosophers rather than waiting for them.
//!
//! ## Counter model
//!
//! The meal counter is written only by its philosopher and read at any time
//! by the harness. It increments monotonically, so a snapshot taken while
//! the philosopher is still parked is a consistent (if slightly stale) read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Pause;
use crate::fork::Fork;
use crate::strategy::DiningStrategy;
use crate::table::StopSignal;

/// One seat at the table.
pub struct Philosopher {
    id: usize,
    left: Arc<Fork>,
    right: Arc<Fork>,
    meals: Arc<AtomicU64>,
    stop: StopSignal,
    think: Pause,
    eat: Pause,
}

impl Philosopher {
    pub fn new(
        id: usize,
        left: Arc<Fork>,
        right: Arc<Fork>,
        stop: StopSignal,
        think: Pause,
        eat: Pause,
    ) -> Self {
        Self {
            id,
            left,
            right,
            meals: Arc::new(AtomicU64::new(0)),
            stop,
            think,
            eat,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Fork on this philosopher's left: `fork[i]`.
    pub fn left(&self) -> &Fork {
        &self.left
    }

    /// Fork on this philosopher's right: `fork[(i + 1) % N]`.
    pub fn right(&self) -> &Fork {
        &self.right
    }

    /// Handle to the meal counter, safe to read from the harness while the
    /// philosopher is running (or parked).
    pub fn meal_counter(&self) -> Arc<AtomicU64> {
        self.meals.clone()
    }

    /// Stop signal shared with the harness; strategies use it for their own
    /// checkpoints.
    pub fn stop(&self) -> &StopSignal {
        &self.stop
    }

    async fn think(&self) {
        debug!(id = self.id, "thinking");
        sleep(self.think.sample()).await;
    }

    /// Eats one meal and records it. Called by strategies while both forks
    /// are held.
    pub async fn eat(&self) {
        let meal = self.meals.load(Ordering::Relaxed) + 1;
        debug!(id = self.id, meal, "eating");
        sleep(self.eat.sample()).await;
        self.meals.fetch_add(1, Ordering::SeqCst);
    }

    /// The philosopher's event loop. Runs until the stop signal is observed
    /// at a checkpoint; an error from a single dine attempt is logged and
    /// isolated, it never takes the other philosophers down.
    pub async fn run(self, strategy: Arc<dyn DiningStrategy>) {
        info!(id = self.id, strategy = strategy.name(), "philosopher seated");

        while !self.stop.is_requested() {
            self.think().await;
            if self.stop.is_requested() {
                break;
            }
            if let Err(e) = strategy.dine(&self).await {
                warn!(id = self.id, error = %e, "dine attempt failed");
            }
        }

        info!(
            id = self.id,
            meals = self.meals.load(Ordering::SeqCst),
            "philosopher left the table"
        );
    }
}
