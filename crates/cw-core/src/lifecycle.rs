//! Request lifecycle state machine.
//!
//! The [`Controller`] is the single writer of all UI state. It consumes
//! [`Event`]s (user input and request completions) and answers with at most
//! one [`Effect`] for the runtime to carry out. It never performs I/O.
//!
//! ```text
//!            Submit (word non-blank)
//!   Idle ──────────────────────────────> Loading ──Resolved(ok)──> Success
//!    ▲  ▲                                   │  ▲                      │
//!    │  │                                   │  └──── Submit ──────────┤
//!    │  │                      Resolved(err)▼                         │
//!    │  └───────── Clear ──────────────── Failed <────────────────────┘
//!    └──────────── Clear (from any state)
//! ```
//!
//! Completions carry the [`RequestId`] they were started with. A completion
//! that does not belong to the request currently loading is stale and is
//! dropped.

use log::{debug, info};

use crate::clock::{Clock, SystemClock, COPY_INDICATOR_MS};
use crate::error::{Failure, GenerationError};
use crate::locale::Locale;
use crate::query::{Difficulty, HintCount, Query};
use crate::result::GenerationResult;

/// Identifier tagging one started request.
pub type RequestId = u64;

/// The request mode. Exactly one is active at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        request: RequestId,
    },
    Success(GenerationResult),
    Failed(Failure),
}

impl RequestState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            RequestState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Editable form fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub word: String,
    pub hint_count: HintCount,
    pub difficulty: Difficulty,
}

/// Input to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    WordChanged(String),
    HintCountSelected(HintCount),
    DifficultySelected(Difficulty),
    Submit,
    Resolved {
        request: RequestId,
        outcome: Result<GenerationResult, GenerationError>,
    },
    Clear,
    /// Copy the clue at a zero-based index.
    CopyClue(usize),
    /// Time passed; expired timers are pruned.
    Tick,
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartRequest { request: RequestId, query: Query },
    /// Write text to the clipboard and send a [`Event::Tick`] once the
    /// indicator has expired.
    CopyToClipboard { text: String, expires_in_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopiedMarker {
    index: usize,
    expires_at_ms: u64,
}

/// Owner of the form, the request state and the copy indicator.
pub struct Controller<C: Clock = SystemClock> {
    form: FormState,
    state: RequestState,
    copied: Option<CopiedMarker>,
    request_id_next: RequestId,
    locale: Locale,
    clock: C,
}

impl Controller<SystemClock> {
    #[must_use]
    pub fn with_system_clock(locale: Locale) -> Self {
        Self::new(SystemClock::new(), locale)
    }
}

impl<C: Clock> Controller<C> {
    pub fn new(clock: C, locale: Locale) -> Self {
        Self {
            form: FormState::default(),
            state: RequestState::Idle,
            copied: None,
            request_id_next: 1,
            locale,
            clock,
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Whether a submit right now would start a request.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && !self.form.word.trim().is_empty()
    }

    /// Index of the clue whose "copied" indicator is showing.
    #[must_use]
    pub fn copied_index(&self) -> Option<usize> {
        let now_ms = self.clock.now_ms();
        self.copied
            .filter(|marker| now_ms < marker.expires_at_ms)
            .map(|marker| marker.index)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::WordChanged(word) => {
                self.form.word = word;
                None
            }
            Event::HintCountSelected(count) => {
                self.form.hint_count = count;
                None
            }
            Event::DifficultySelected(difficulty) => {
                self.form.difficulty = difficulty;
                None
            }
            Event::Submit => self.submit(),
            Event::Resolved { request, outcome } => {
                self.resolve(request, outcome);
                None
            }
            Event::Clear => {
                self.clear();
                None
            }
            Event::CopyClue(index) => self.copy_clue(index),
            Event::Tick => {
                if self.copied.is_some() && self.copied_index().is_none() {
                    self.copied = None;
                }
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.state.is_loading() {
            debug!("submit ignored: a request is already in flight");
            return None;
        }

        let query = Query::new(&self.form.word, self.form.hint_count, self.form.difficulty).ok()?;

        let request = self.request_id_next;
        self.request_id_next += 1;
        self.state = RequestState::Loading { request };
        self.copied = None;

        info!(
            "request {} started: count={} difficulty={}",
            request,
            query.hint_count(),
            query.difficulty().keyword()
        );

        Some(Effect::StartRequest { request, query })
    }

    fn resolve(&mut self, request: RequestId, outcome: Result<GenerationResult, GenerationError>) {
        match self.state {
            RequestState::Loading { request: current } if current == request => {}
            _ => {
                debug!("request {} completed after it was superseded; dropping", request);
                return;
            }
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    "request {} succeeded: {} clues, {} synonyms, {} antonyms",
                    request,
                    result.clues.len(),
                    result.synonyms.len(),
                    result.antonyms.len()
                );
                RequestState::Success(result)
            }
            Err(error) => {
                info!("request {} failed: {}", request, error);
                RequestState::Failed(Failure::from_error(&error, self.locale))
            }
        };

        debug_assert!(!self.state.is_loading(), "resolved request must leave Loading");
    }

    fn clear(&mut self) {
        self.form.word.clear();
        self.state = RequestState::Idle;
        self.copied = None;
    }

    fn copy_clue(&mut self, index: usize) -> Option<Effect> {
        let text = self.state.result()?.clue(index)?.to_string();

        self.copied = Some(CopiedMarker {
            index,
            expires_at_ms: self.clock.now_ms().saturating_add(COPY_INDICATOR_MS),
        });

        Some(Effect::CopyToClipboard {
            text,
            expires_in_ms: COPY_INDICATOR_MS,
        })
    }
}
