use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected {OPTION_COUNT} options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("correct option index {0} is out of range")]
    CorrectOptionOutOfRange(usize),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Difficulty tier used for the performance breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Unvalidated question input, e.g. from a seed list or a JSON bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub difficulty: Difficulty,
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft and assign it an id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or an option is blank, the option
    /// count is not `OPTION_COUNT`, or the correct index is out of range.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|opts: Vec<String>| QuestionError::WrongOptionCount(opts.len()))?;

        if let Some(blank) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(blank));
        }

        if self.correct_option >= OPTION_COUNT {
            return Err(QuestionError::CorrectOptionOutOfRange(self.correct_option));
        }

        Ok(Question {
            id,
            text: text.to_owned(),
            options,
            correct_option: self.correct_option,
            difficulty: self.difficulty,
            explanation: self.explanation.trim().to_owned(),
        })
    }
}

/// A single multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; OPTION_COUNT],
    correct_option: usize,
    difficulty: Difficulty,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
