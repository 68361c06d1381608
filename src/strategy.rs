//! # Dining Strategies
//!
//! The two fork-acquisition protocols, behind one async trait so the
//! philosopher loop is written once and the protocol is injected at spawn
//! time, the same way the actor loop and entity behavior are separated in a
//! generic actor system.
//!
//! - [`Naive`] — every philosopher grabs left then right. Symmetric orders
//!   on a ring admit a circular wait; the strategy even inserts a small
//!   fixed delay between the two grabs to widen that window. This protocol
//!   is *supposed* to deadlock.
//! - [`Corrected`] — a [`Waiter`] permit bounds concurrent claimants to
//!   N-1, and seat parity flips the acquisition order so neighbors never
//!   contend in opposite orders. Either mechanism alone prevents the
//!   circular wait; they are combined for redundancy.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::debug;

use crate::error::SimError;
use crate::philosopher::Philosopher;
use crate::waiter::Waiter;

/// Selector for the two known protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Naive,
    Corrected,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Naive => "naive",
            StrategyKind::Corrected => "corrected",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(StrategyKind::Naive),
            "corrected" => Ok(StrategyKind::Corrected),
            other => Err(SimError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One complete dine attempt: acquire both forks per protocol, eat, release.
#[async_trait]
pub trait DiningStrategy: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Runs one acquisition-eat-release cycle for `seat`.
    ///
    /// Under the naive protocol this call may never return: the philosopher
    /// can park forever on its right fork. Callers must not rely on it
    /// completing.
    async fn dine(&self, seat: &Philosopher) -> Result<(), SimError>;
}

/// Left-then-right for everyone. Deadlocks by design.
pub struct Naive {
    grab_delay: Duration,
}

impl Naive {
    /// `grab_delay` is the pause between the two grabs; larger values make
    /// the deadlock reproduce faster.
    pub fn new(grab_delay: Duration) -> Self {
        Self { grab_delay }
    }
}

#[async_trait]
impl DiningStrategy for Naive {
    fn name(&self) -> &'static str {
        "naive"
    }

    async fn dine(&self, seat: &Philosopher) -> Result<(), SimError> {
        debug!(id = seat.id(), "grabbing left fork");
        let _left = seat.left().acquire().await;

        // Hold left while pausing before the right grab; this is the race
        // window that lets every seat end up one fork short.
        sleep(self.grab_delay).await;

        debug!(id = seat.id(), "grabbing right fork");
        let _right = seat.right().acquire().await;

        seat.eat().await;

        // Guards drop in reverse declaration order: right, then left.
        Ok(())
    }
}

/// Waiter admission plus parity-ordered acquisition.
pub struct Corrected {
    waiter: Arc<Waiter>,
}

impl Corrected {
    pub fn new(waiter: Arc<Waiter>) -> Self {
        Self { waiter }
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }
}

#[async_trait]
impl DiningStrategy for Corrected {
    fn name(&self) -> &'static str {
        "corrected"
    }

    async fn dine(&self, seat: &Philosopher) -> Result<(), SimError> {
        let _permit = self.waiter.enter().await;

        // Re-check after possibly blocking on admission; this is the last
        // checkpoint before the acquisition chain.
        if seat.stop().is_requested() {
            return Ok(());
        }

        if seat.id() % 2 == 0 {
            debug!(id = seat.id(), "even seat: left fork first");
            let _left = seat.left().acquire().await;
            let _right = seat.right().acquire().await;
            seat.eat().await;
            // Drops release right, then left.
        } else {
            debug!(id = seat.id(), "odd seat: right fork first");
            let _right = seat.right().acquire().await;
            let _left = seat.left().acquire().await;
            seat.eat().await;
            // Drops release left, then right.
        }

        // The permit outlives both fork guards within this scope, so the
        // seat stays counted against the N-1 limit until both forks are
        // back on the table.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_strategies() {
        assert_eq!("naive".parse::<StrategyKind>().unwrap(), StrategyKind::Naive);
        assert_eq!(
            "corrected".parse::<StrategyKind>().unwrap(),
            StrategyKind::Corrected
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = "hierarchical".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, SimError::UnknownStrategy(_)));
    }

    #[test]
    fn kind_round_trips_through_display() {
        for kind in [StrategyKind::Naive, StrategyKind::Corrected] {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }
}
