//! # cw-dst
//!
//! Deterministic Simulation Testing for the clue generator.
//!
//! Time, randomness and service failures are all driven from one seed so a
//! failing session can be replayed exactly.
//!
//! ## Usage
//!
//! ```rust
//! use cw_dst::DstEnv;
//!
//! let mut env = DstEnv::new(12345);
//!
//! // Deterministic time
//! env.clock().advance_ms(2_000);
//!
//! // Generation service that fails according to the fault config
//! let service = env.service();
//! assert_eq!(service.calls_count(), 0);
//! ```
//!
//! ## Reproducibility
//!
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

pub mod clock;
pub mod env;
pub mod fault;
pub mod random;
pub mod service;

pub use clock::SimClock;
pub use env::DstEnv;
pub use fault::{FaultConfig, FaultInjector, ServiceFault};
pub use random::DeterministicRng;
pub use service::{SimReply, SimService};

/// Get DST seed from environment or generate random one.
///
/// Prints the seed for reproduction. Use `DST_SEED=<seed>` to reproduce.
#[must_use]
pub fn get_or_generate_seed() -> u64 {
    if let Ok(raw) = std::env::var("DST_SEED") {
        match raw.parse::<u64>() {
            Ok(seed) => {
                println!("DST_SEED={} (from environment)", seed);
                return seed;
            }
            Err(_) => log::warn!("ignoring DST_SEED={:?}: not a valid u64", raw),
        }
    }

    let seed = rand::random::<u64>().max(1);
    println!("DST_SEED={} (randomly generated)", seed);
    seed
}
