//! User query: the word plus its two fixed selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Number of clues to request. Only these four counts are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum HintCount {
    One,
    #[default]
    Three,
    Five,
    Ten,
}

impl HintCount {
    /// All selectable counts, in display order.
    pub const ALL: [HintCount; 4] = [HintCount::One, HintCount::Three, HintCount::Five, HintCount::Ten];

    #[must_use]
    pub fn get(self) -> u8 {
        match self {
            HintCount::One => 1,
            HintCount::Three => 3,
            HintCount::Five => 5,
            HintCount::Ten => 10,
        }
    }
}

impl TryFrom<u8> for HintCount {
    type Error = QueryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HintCount::ALL
            .into_iter()
            .find(|c| c.get() == value)
            .ok_or(QueryError::UnsupportedHintCount(value))
    }
}

impl FromStr for HintCount {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidHintCount(s.to_string()))?;
        HintCount::try_from(value)
    }
}

impl fmt::Display for HintCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// How indirect the generated clues should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    VeryEasy,
    #[default]
    Medium,
    Hard,
    Riddle,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::VeryEasy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Riddle,
    ];

    /// Descriptor embedded in the prompt.
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "سهل جداً ومباشر",
            Difficulty::Medium => "متوسط",
            Difficulty::Hard => "صعب ويحتاج لتفكير",
            Difficulty::Riddle => "لغز شعري أو مجازي",
        }
    }

    /// Short label shown on the selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "سهل",
            Difficulty::Medium => "متوسط",
            Difficulty::Hard => "صعب",
            Difficulty::Riddle => "لغز",
        }
    }

    /// ASCII keyword accepted on the command line.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Riddle => "riddle",
        }
    }
}

impl FromStr for Difficulty {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| {
                d.keyword().eq_ignore_ascii_case(needle) || d.label() == needle || d.descriptor() == needle
            })
            .ok_or_else(|| QueryError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One submitted query. Immutable for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    word: String,
    hint_count: HintCount,
    difficulty: Difficulty,
}

impl Query {
    /// Create a query. The word is stored trimmed and must not be empty.
    pub fn new(word: &str, hint_count: HintCount, difficulty: Difficulty) -> Result<Self, QueryError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(QueryError::EmptyWord);
        }

        Ok(Self {
            word: word.to_string(),
            hint_count,
            difficulty,
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn hint_count(&self) -> HintCount {
        self.hint_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
