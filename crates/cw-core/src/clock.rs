//! Time source for UI timers.
//!
//! The only timer in the lifecycle is the "copied" indicator. The controller
//! reads time through [`Clock`] so tests can drive it with a simulated clock.

use std::sync::Arc;
use std::time::Instant;

/// How long the "copied" indicator stays visible after a copy.
pub const COPY_INDICATOR_MS: u64 = 2_000;

/// Monotonic millisecond clock.
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
