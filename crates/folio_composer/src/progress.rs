//! Perceived-progress signal shown while a submission is pending.
//!
//! The collaborators do not report transferred bytes, so [`SimulatedProgress`]
//! advances by small random increments and stalls at a ceiling until the final
//! step completes. It is a simulation, not a measurement. A transport that can
//! report real progress plugs in through [`ProgressEstimator`] without touching
//! the coordinator.

use crate::ProgressConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Source of the percentage shown during submission.
///
/// Values returned by one estimator are monotonically non-decreasing between
/// [`start`](ProgressEstimator::start) calls.
pub trait ProgressEstimator: Send {
    /// Reset to 0 at the beginning of a submission.
    fn start(&mut self);

    /// Advance while a step is pending and return the new percentage.
    fn tick(&mut self) -> u8;

    /// Snap to 100 once the final step has succeeded.
    fn complete(&mut self) -> u8;

    /// Current percentage.
    fn current(&self) -> u8;
}

/// Random-increment simulation capped below 100.
#[derive(Debug)]
pub struct SimulatedProgress {
    config: ProgressConfig,
    value: u8,
    rng: StdRng,
}

impl SimulatedProgress {
    /// Simulation seeded from OS entropy.
    pub fn new(config: ProgressConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Deterministic simulation for tests.
    pub fn with_seed(config: ProgressConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: ProgressConfig, rng: StdRng) -> Self {
        Self {
            config,
            value: 0,
            rng,
        }
    }

    fn ceiling(&self) -> u8 {
        self.config.ceiling.min(99)
    }
}

impl ProgressEstimator for SimulatedProgress {
    fn start(&mut self) {
        self.value = 0;
    }

    fn tick(&mut self) -> u8 {
        let ceiling = self.ceiling();
        if self.value >= ceiling {
            return self.value;
        }
        let low = self.config.min_step.min(self.config.max_step);
        let high = self.config.min_step.max(self.config.max_step);
        let step = self.rng.gen_range(low..=high);
        self.value = self.value.saturating_add(step).min(ceiling);
        trace!(progress = self.value, "Progress tick");
        self.value
    }

    fn complete(&mut self) -> u8 {
        self.value = 100;
        self.value
    }

    fn current(&self) -> u8 {
        self.value
    }
}
