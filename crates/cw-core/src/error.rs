//! Error taxonomy.
//!
//! Every failure of a request ends up as a [`GenerationError`] and is
//! rendered once, at the lifecycle boundary, into a [`Failure`] holding the
//! localized text. Nothing here is retried.

use thiserror::Error;

use crate::locale::Locale;

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("word is empty")]
    EmptyWord,

    #[error("unsupported hint count {0} (expected 1, 3, 5 or 10)")]
    UnsupportedHintCount(u8),

    #[error("invalid hint count: {0}")]
    InvalidHintCount(String),

    #[error("unknown difficulty: {0} (expected easy, medium, hard or riddle)")]
    UnknownDifficulty(String),

    #[error("unknown locale: {0} (expected ar or en)")]
    UnknownLocale(String),
}

/// Terminal failure of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Credential absent or placeholder; detected before any network call.
    #[error("API credential is not configured")]
    Configuration,

    #[error("API credential was rejected")]
    Credential,

    #[error("usage quota exceeded")]
    Quota,

    #[error("service not available in this region")]
    Region,

    #[error("service returned no result")]
    EmptyResult,

    #[error("malformed response payload: {0}")]
    Parse(String),

    #[error("{0}")]
    Generic(String),
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Configuration => ErrorKind::Configuration,
            GenerationError::Credential => ErrorKind::Credential,
            GenerationError::Quota => ErrorKind::Quota,
            GenerationError::Region => ErrorKind::Region,
            GenerationError::EmptyResult => ErrorKind::EmptyResult,
            GenerationError::Parse(_) => ErrorKind::Parse,
            GenerationError::Generic(_) => ErrorKind::Generic,
        }
    }

    /// Localized text shown to the user.
    ///
    /// Parse and generic failures surface their raw text behind a short
    /// prefix, or the fixed fallback when there is no text at all.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            GenerationError::Parse(raw) | GenerationError::Generic(raw) => {
                if raw.trim().is_empty() {
                    locale.message(self.kind()).to_string()
                } else {
                    format!("{}: {}", locale.error_prefix(), raw)
                }
            }
            other => locale.message(other.kind()).to_string(),
        }
    }
}

/// Payload-free discriminant of [`GenerationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Credential,
    Quota,
    Region,
    EmptyResult,
    Parse,
    Generic,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Configuration,
        ErrorKind::Credential,
        ErrorKind::Quota,
        ErrorKind::Region,
        ErrorKind::EmptyResult,
        ErrorKind::Parse,
        ErrorKind::Generic,
    ];
}

/// A rendered failure, as stored in the `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    #[must_use]
    pub fn from_error(error: &GenerationError, locale: Locale) -> Self {
        Self {
            kind: error.kind(),
            message: error.user_message(locale),
        }
    }
}
