//! DST environment combining clock, RNG and fault injection.

use std::sync::Arc;

use cw_core::Clock;

use crate::clock::SimClock;
use crate::fault::{FaultConfig, FaultInjector};
use crate::random::DeterministicRng;
use crate::service::SimService;

/// Complete DST environment. Given the same seed, all behaviour is
/// deterministic.
pub struct DstEnv {
    seed: u64,
    clock: Arc<SimClock>,
    rng: DeterministicRng,
    fault_config: FaultConfig,
}

impl DstEnv {
    /// Create an environment with the default fault config.
    pub fn new(seed: u64) -> Self {
        Self::with_fault_config(seed, FaultConfig::default())
    }

    pub fn with_fault_config(seed: u64, fault_config: FaultConfig) -> Self {
        debug_assert!(seed != 0, "Seed should not be zero");

        Self {
            seed,
            clock: Arc::new(SimClock::new()),
            rng: DeterministicRng::new(seed),
            fault_config,
        }
    }

    /// Shared handle to the simulated clock.
    #[must_use]
    pub fn clock(&self) -> Arc<SimClock> {
        Arc::clone(&self.clock)
    }

    pub fn rng(&mut self) -> &mut DeterministicRng {
        &mut self.rng
    }

    /// Build a simulated service with its own forked RNG streams.
    pub fn service(&mut self) -> SimService {
        let payload_rng = self.rng.fork();
        let fault_rng = self.rng.fork();
        SimService::new(
            payload_rng,
            FaultInjector::new(fault_rng, self.fault_config.clone()),
        )
    }

    /// Format seed for error messages.
    #[must_use]
    pub fn format_seed(&self) -> String {
        format!("DST_SEED={}", self.seed)
    }

    /// One-line summary for test output.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} elapsed={}ms rng_calls={}",
            self.format_seed(),
            self.clock.now_ms(),
            self.rng.calls_count()
        )
    }
}
