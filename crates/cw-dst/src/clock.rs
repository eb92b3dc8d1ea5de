//! Deterministic simulated time.
//!
//! Time only advances when a test asks it to, which makes the copy
//! indicator's expiry observable without sleeping.

use std::sync::atomic::{AtomicU64, Ordering};

use cw_core::Clock;

/// Simulated millisecond clock.
///
/// Shared through `Arc` between the test and the controller under test;
/// only the test advances it.
pub struct SimClock {
    now_ms: AtomicU64,
}

/// Leave headroom so `now + COPY_INDICATOR_MS` never overflows.
const TIME_MS_MAX: u64 = u64::MAX / 2;

impl SimClock {
    /// Create a new clock starting at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time_ms(0)
    }

    /// Create a clock starting at a specific time.
    #[must_use]
    pub fn with_start_time_ms(start_ms: u64) -> Self {
        debug_assert!(start_ms <= TIME_MS_MAX, "Start time too large");
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    /// Advance time by the given number of milliseconds.
    pub fn advance_ms(&self, delta_ms: u64) {
        debug_assert!(delta_ms > 0, "Delta must be positive");

        let previous = self.now_ms.fetch_add(delta_ms, Ordering::AcqRel);
        debug_assert!(
            previous <= TIME_MS_MAX - delta_ms,
            "Time advance would overflow"
        );
    }

    /// Simulate a sleep. Returns immediately after advancing the clock;
    /// a zero duration leaves time where it is.
    pub fn sleep_ms(&self, duration_ms: u64) {
        if duration_ms > 0 {
            self.advance_ms(duration_ms);
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Acquire)
    }
}
