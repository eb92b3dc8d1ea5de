//! # cw-stateright
//!
//! Stateright model of the request lifecycle driven by
//! [`cw_core::Controller`].
//!
//! The model abstracts clue content away and keeps only what the invariants
//! talk about: which request is live, which calls are still in flight, and
//! whether a clue is marked as copied. Named scenarios are replayed against
//! the real controller in `tests/`.

pub mod lifecycle;
pub mod scenario;

pub use lifecycle::{LifecycleAction, LifecycleModel, LifecycleState, Mode};
pub use scenario::{scenarios, Scenario};
