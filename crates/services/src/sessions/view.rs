use quiz_core::assessment::{AssessmentSession, SessionPhase, SessionState};
use quiz_core::model::{Difficulty, QuestionId};
use quiz_core::performance::PerformanceReport;

use super::progress::SessionProgress;

/// Presentation-agnostic picture of a session at one instant.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - the answer key and explanation appear only once the explanation phase
///   has been reached
///
/// Front-ends render it however they like.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub question_id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    pub phase: SessionPhase,
    pub state: SessionState,
    pub progress: SessionProgress,
    pub explanation: Option<String>,
    pub correct_option: Option<usize>,
    /// Present once the session is complete.
    pub performance: Option<PerformanceReport>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session: &AssessmentSession) -> Self {
        let state = session.state().clone();
        let phase = session.phase();
        let total = session.bank().len();
        let index = state.current_index();

        let (question_id, text, options, difficulty, explanation, correct_option) =
            match session.current_question() {
                Some(q) => {
                    let revealed = state.explanation_visible();
                    (
                        q.id(),
                        q.text().to_owned(),
                        q.options().to_vec(),
                        q.difficulty(),
                        revealed.then(|| q.explanation().to_owned()),
                        revealed.then(|| q.correct_option()),
                    )
                }
                None => (
                    QuestionId::new(0),
                    String::new(),
                    Vec::new(),
                    Difficulty::Easy,
                    None,
                    None,
                ),
            };

        let is_complete = state.is_complete();
        let remaining = if is_complete {
            0
        } else {
            total.saturating_sub(index)
        };
        let performance = is_complete
            .then(|| PerformanceReport::compute(session.bank(), state.difficulty_tally()));

        Self {
            question_id,
            text,
            options,
            difficulty,
            phase,
            progress: SessionProgress {
                position: index + 1,
                total,
                remaining,
                is_complete,
            },
            state,
            explanation,
            correct_option,
            performance,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use quiz_core::model::{QuestionBank, QuestionDraft, SessionSettings};

    fn session() -> AssessmentSession {
        let questions = (1..=2)
            .map(|id| {
                QuestionDraft {
                    text: format!("Q{id}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_option: 1,
                    difficulty: Difficulty::Medium,
                    explanation: format!("E{id}"),
                }
                .validate(QuestionId::new(id))
                .unwrap()
            })
            .collect();
        AssessmentSession::new(
            Arc::new(QuestionBank::new(questions).unwrap()),
            SessionSettings::default(),
        )
    }

    #[test]
    fn answer_key_is_hidden_until_submitted() {
        let mut session = session();
        let before = SessionSnapshot::capture(&session);
        assert_eq!(before.explanation, None);
        assert_eq!(before.correct_option, None);
        assert_eq!(before.progress.position, 1);
        assert_eq!(before.progress.remaining, 2);

        session.select_option(0).unwrap();
        session.submit();
        let after = SessionSnapshot::capture(&session);
        assert_eq!(after.explanation.as_deref(), Some("E1"));
        assert_eq!(after.correct_option, Some(1));
        assert_eq!(after.phase, SessionPhase::Explanation);
        assert!(after.performance.is_none());
    }

    #[test]
    fn completed_snapshot_carries_performance() {
        let mut session = session();
        for _ in 0..2 {
            session.select_option(1).unwrap();
            session.submit();
            session.advance();
        }
        let snap = SessionSnapshot::capture(&session);
        assert!(snap.progress.is_complete);
        assert_eq!(snap.progress.remaining, 0);
        let perf = snap.performance.unwrap();
        assert_eq!(perf.tier(Difficulty::Medium).percent(), Some(100.0));
    }
}
