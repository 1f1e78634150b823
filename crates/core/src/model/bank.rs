use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Difficulty, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),
}

/// Static, ordered list of questions for one assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` for an empty list and
    /// `QuestionBankError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id()) {
                return Err(QuestionBankError::DuplicateId(q.id()));
            }
        }

        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; a bank holds at least one question.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Number of questions in the given tier.
    #[must_use]
    pub fn count_by_difficulty(&self, tier: Difficulty) -> u32 {
        let count = self
            .questions
            .iter()
            .filter(|q| q.difficulty() == tier)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
