//! # Simulation Configuration
//!
//! Everything about a run that is tunable lives in [`SimConfig`]: the size
//! of the ring, the wall-clock budget, the shutdown grace period, and the
//! timing constants of the philosophers themselves.
//!
//! The defaults reproduce the classic demonstration: five seats, think/eat
//! pauses drawn uniformly from 0.1–0.5 s, and a 10 ms delay between the two
//! fork grabs of the naive protocol. That delay is a tunable heuristic that
//! widens the race window so the deadlock shows up quickly; it is not a
//! semantic contract, and the tests crank it up to make the deadlock
//! deterministic.

use std::time::Duration;

use rand::Rng;

use crate::error::SimError;

/// An inclusive range of pause durations sampled uniformly per suspension.
#[derive(Debug, Clone, Copy)]
pub struct Pause {
    pub min: Duration,
    pub max: Duration,
}

impl Pause {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Draws one pause duration.
    ///
    /// The RNG handle is scoped to this call so the returned `Duration` can
    /// be awaited on without holding a non-`Send` generator across the
    /// suspension point.
    pub fn sample(&self) -> Duration {
        let mut rng = rand::rng();
        let secs = rng.random_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of philosophers (and forks) in the ring.
    pub seats: usize,
    /// Wall-clock budget for the run. The philosophers never terminate on
    /// their own; budget expiry is the normal termination trigger.
    pub time_budget: Duration,
    /// How long the harness waits, after requesting stop, for philosophers
    /// to observe the signal and exit before abandoning them.
    pub grace_period: Duration,
    /// Pause range while thinking.
    pub think: Pause,
    /// Pause range while eating.
    pub eat: Pause,
    /// Fixed delay the naive protocol inserts between acquiring the left
    /// and the right fork, to widen the circular-wait race window.
    pub grab_delay: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seats: 5,
            time_budget: Duration::from_secs(5),
            grace_period: Duration::from_secs(1),
            think: Pause::new(Duration::from_millis(100), Duration::from_millis(500)),
            eat: Pause::new(Duration::from_millis(100), Duration::from_millis(500)),
            grab_delay: Duration::from_millis(10),
        }
    }
}

impl SimConfig {
    /// Checks the structural requirements of a run.
    ///
    /// A ring needs at least two seats (with one seat the same fork would
    /// be both left and right, and the lock is not reentrant), and the
    /// budget must be positive.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.seats < 2 {
            return Err(SimError::InvalidConfig(format!(
                "need at least 2 seats, got {}",
                self.seats
            )));
        }
        if self.time_budget.is_zero() {
            return Err(SimError::InvalidConfig(
                "time budget must be positive".to_string(),
            ));
        }
        if self.think.min > self.think.max || self.eat.min > self.eat.max {
            return Err(SimError::InvalidConfig(
                "pause range must have min <= max".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_rings() {
        for seats in [0, 1] {
            let config = SimConfig {
                seats,
                ..SimConfig::default()
            };
            assert!(config.validate().is_err(), "{} seats should be rejected", seats);
        }
    }

    #[test]
    fn rejects_zero_budget() {
        let config = SimConfig {
            time_budget: Duration::ZERO,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pause_range() {
        let config = SimConfig {
            think: Pause::new(Duration::from_millis(500), Duration::from_millis(100)),
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pause_sample_stays_in_range() {
        let pause = Pause::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let d = pause.sample();
            assert!(d >= pause.min && d <= pause.max);
        }
    }
}
