//! # cw-core
//!
//! Core types for the crossword clue generator.
//!
//! Everything here is pure data-in/data-out: the rendering layer and the
//! network live elsewhere and talk to this crate through [`Event`]s,
//! [`Effect`]s and the [`GenerationService`] seam.
//!
//! ```text
//! ┌─────────────┐  Event   ┌──────────────┐  Effect   ┌─────────────┐
//! │  Terminal   │ ───────> │  Controller  │ ────────> │  Generator  │
//! │  (input)    │          │  (lifecycle) │           │  (service)  │
//! └─────────────┘          └──────▲───────┘           └──────┬──────┘
//!                                 │   Event::Resolved        │
//!                                 └──────────────────────────┘
//! ```

pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod locale;
pub mod query;
pub mod result;
pub mod service;

pub use clock::{Clock, SystemClock, COPY_INDICATOR_MS};
pub use error::{ErrorKind, Failure, GenerationError, QueryError};
pub use lifecycle::{Controller, Effect, Event, FormState, RequestId, RequestState};
pub use locale::Locale;
pub use query::{Difficulty, HintCount, Query};
pub use result::GenerationResult;
pub use service::{ApiKey, GenerationRequest, GenerationService, ThinkingLevel, TransportError};
