use std::fmt::Write as _;

use quiz_core::assessment::SessionPhase;
use quiz_core::model::SessionSummary;
use quiz_core::performance::PerformanceReport;
use services::SessionSnapshot;

/// What changed between two snapshots, as far as the terminal cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    Countdown(u32),
    Frame,
}

#[must_use]
pub fn redraw(previous: &SessionSnapshot, next: &SessionSnapshot) -> Redraw {
    // A countdown that went up means the question was reset (e.g. restart).
    let countdown_reset = next.state.remaining_seconds() > previous.state.remaining_seconds();
    let same_screen = previous.phase == next.phase
        && previous.state.current_index() == next.state.current_index()
        && previous.state.selected_option() == next.state.selected_option()
        && !countdown_reset;

    if !same_screen {
        return Redraw::Frame;
    }
    let remaining = next.state.remaining_seconds();
    if remaining != previous.state.remaining_seconds() && worth_announcing(remaining) {
        Redraw::Countdown(remaining)
    } else {
        Redraw::Nothing
    }
}

fn worth_announcing(remaining: u32) -> bool {
    remaining <= 5 || remaining % 15 == 0
}

#[must_use]
pub fn frame(snapshot: &SessionSnapshot) -> String {
    match snapshot.phase {
        SessionPhase::Unanswered => question_frame(snapshot),
        SessionPhase::Explanation => explanation_frame(snapshot),
        SessionPhase::Complete => results_frame(snapshot),
    }
}

fn question_frame(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nQuestion {}/{} [{}]  {}s left",
        snapshot.progress.position,
        snapshot.progress.total,
        snapshot.difficulty,
        snapshot.state.remaining_seconds()
    );
    let _ = writeln!(out, "{}", snapshot.text);
    for (i, option) in snapshot.options.iter().enumerate() {
        let marker = if snapshot.state.selected_option() == Some(i) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, " {marker} {}) {option}", i + 1);
    }
    out
}

fn explanation_frame(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    match snapshot.state.last_answer_correct() {
        Some(true) => {
            let _ = writeln!(out, "Correct!");
        }
        _ => {
            let answer = snapshot
                .correct_option
                .and_then(|i| snapshot.options.get(i).map(|text| (i, text)));
            match answer {
                Some((i, text)) => {
                    let _ = writeln!(out, "Incorrect. The answer is {}) {text}", i + 1);
                }
                None => {
                    let _ = writeln!(out, "Incorrect.");
                }
            }
        }
    }
    if let Some(explanation) = snapshot.explanation.as_deref().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "{explanation}");
    }
    let _ = writeln!(out, "Score: {}  (n for next)", snapshot.state.score());
    out
}

fn results_frame(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nQuiz complete: {}/{} correct",
        snapshot.state.score(),
        snapshot.progress.total
    );
    if let Some(report) = &snapshot.performance {
        out.push_str(&performance_table(report));
    }
    let _ = writeln!(out, "(r to restart, q to quit)");
    out
}

#[must_use]
pub fn performance_table(report: &PerformanceReport) -> String {
    let mut out = String::new();
    for tier in report.tiers() {
        let _ = writeln!(
            out,
            "  {:<6} {}/{} ({})",
            tier.tier,
            tier.correct,
            tier.total,
            percent_label(tier.percent())
        );
    }
    let _ = writeln!(out, "  overall {}", percent_label(report.overall_percent()));
    out
}

#[must_use]
pub fn summary_line(summary: &SessionSummary) -> String {
    let elapsed = summary.completed_at() - summary.started_at();
    format!(
        "Final score {}/{} in {}s",
        summary.score(),
        summary.total_questions(),
        elapsed.num_seconds()
    )
}

fn percent_label(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{p:.0}%"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use quiz_core::assessment::AssessmentSession;
    use quiz_core::model::{Difficulty, QuestionBank, QuestionDraft, QuestionId, SessionSettings};

    fn session() -> AssessmentSession {
        let questions = [Difficulty::Easy, Difficulty::Easy]
            .into_iter()
            .enumerate()
            .map(|(i, difficulty)| {
                QuestionDraft {
                    text: format!("Question {i}"),
                    options: vec!["red".into(), "green".into(), "blue".into(), "gray".into()],
                    correct_option: 2,
                    difficulty,
                    explanation: "Blue.".into(),
                }
                .validate(QuestionId::new(i as u64 + 1))
                .unwrap()
            })
            .collect();
        AssessmentSession::new(
            Arc::new(QuestionBank::new(questions).unwrap()),
            SessionSettings::new(20, false).unwrap(),
        )
    }

    #[test]
    fn question_frame_marks_selection() {
        let mut session = session();
        session.select_option(1).unwrap();
        let text = frame(&SessionSnapshot::capture(&session));
        assert!(text.contains("Question 1/2 [easy]  20s left"));
        assert!(text.contains(" * 2) green"));
        assert!(text.contains("   3) blue"));
    }

    #[test]
    fn wrong_answer_frame_reveals_the_key() {
        let mut session = session();
        session.select_option(0).unwrap();
        session.submit();
        let text = frame(&SessionSnapshot::capture(&session));
        assert!(text.contains("Incorrect. The answer is 3) blue"));
        assert!(text.contains("Blue."));
    }

    #[test]
    fn results_frame_shows_na_for_empty_tiers() {
        let mut session = session();
        for _ in 0..2 {
            session.select_option(2).unwrap();
            session.submit();
            session.advance();
        }
        let text = frame(&SessionSnapshot::capture(&session));
        assert!(text.contains("Quiz complete: 2/2 correct"));
        assert!(text.contains("easy   2/2 (100%)"));
        assert!(text.contains("hard   0/0 (n/a)"));
    }

    #[test]
    fn countdown_ticks_redraw_sparingly() {
        let mut session = session();
        let first = SessionSnapshot::capture(&session);
        session.tick();
        let second = SessionSnapshot::capture(&session);
        assert_eq!(redraw(&first, &second), Redraw::Nothing);

        for _ in 0..4 {
            session.tick();
        }
        let at_fifteen = SessionSnapshot::capture(&session);
        assert_eq!(at_fifteen.state.remaining_seconds(), 15);
        assert_eq!(redraw(&second, &at_fifteen), Redraw::Countdown(15));

        session.select_option(0).unwrap();
        let selected = SessionSnapshot::capture(&session);
        assert_eq!(redraw(&at_fifteen, &selected), Redraw::Frame);
    }
}
