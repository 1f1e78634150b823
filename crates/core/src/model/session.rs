use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::assessment::AssessmentSession;
use crate::model::DifficultyTally;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("session is not complete")]
    Incomplete,

    #[error("score ({score}) exceeds question count ({total})")]
    ScoreOutOfRange { score: u32, total: u32 },

    #[error("tally total ({tally}) does not match score ({score})")]
    CountMismatch { score: u32, tally: u32 },
}

/// Aggregate result of a completed assessment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    total_questions: u32,
    difficulty_tally: DifficultyTally,
}

impl SessionSummary {
    /// Build a summary from raw parts, checking they agree with each other.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError` if the time range is inverted, the score
    /// is larger than the question count, or the tally does not sum to the
    /// score.
    pub fn new(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        score: u32,
        total_questions: u32,
        difficulty_tally: DifficultyTally,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if score > total_questions {
            return Err(SessionSummaryError::ScoreOutOfRange {
                score,
                total: total_questions,
            });
        }
        let tally = difficulty_tally.total();
        if tally != score {
            return Err(SessionSummaryError::CountMismatch { score, tally });
        }

        Ok(Self {
            started_at,
            completed_at,
            score,
            total_questions,
            difficulty_tally,
        })
    }

    /// Build a summary from a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::Incomplete` if the session has not
    /// reached its terminal state, plus the checks of [`SessionSummary::new`].
    pub fn from_session(
        session: &AssessmentSession,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        let state = session.state();
        if !state.is_complete() {
            return Err(SessionSummaryError::Incomplete);
        }
        let total = u32::try_from(session.bank().len()).unwrap_or(u32::MAX);
        Self::new(
            started_at,
            completed_at,
            state.score(),
            total,
            *state.difficulty_tally(),
        )
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn difficulty_tally(&self) -> &DifficultyTally {
        &self.difficulty_tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::time::pinned_now;

    #[test]
    fn summary_checks_tally_against_score() {
        let now = pinned_now();
        let mut tally = DifficultyTally::new();
        tally.increment(Difficulty::Hard);

        let summary = SessionSummary::new(now, now, 1, 3, tally).unwrap();
        assert_eq!(summary.score(), 1);
        assert_eq!(summary.total_questions(), 3);

        let err = SessionSummary::new(now, now, 2, 3, tally).unwrap_err();
        assert_eq!(err, SessionSummaryError::CountMismatch { score: 2, tally: 1 });
    }

    #[test]
    fn summary_rejects_inverted_time_range() {
        let now = pinned_now();
        let earlier = now - chrono::Duration::seconds(1);
        let err = SessionSummary::new(now, earlier, 0, 1, DifficultyTally::new()).unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }
}
