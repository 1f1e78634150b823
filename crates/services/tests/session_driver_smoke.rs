use std::sync::Arc;
use std::time::Duration;

use quiz_core::assessment::{NextStep, SessionPhase, Transition};
use quiz_core::model::{Difficulty, SessionSettings};
use quiz_core::time::{pinned_clock, pinned_now};
use services::{AssessmentService, ServiceError, SessionCommand, SessionHandle};
use storage::{InMemoryRepository, QuestionRecord};

fn record(id: u64, correct_option: usize, difficulty: Difficulty) -> QuestionRecord {
    QuestionRecord {
        id,
        text: format!("Question {id}"),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_option,
        difficulty,
        explanation: format!("Explanation {id}"),
    }
}

fn service(seconds: u32) -> AssessmentService {
    let repo = InMemoryRepository::with_records(vec![
        record(1, 0, Difficulty::Easy),
        record(2, 1, Difficulty::Medium),
        record(3, 2, Difficulty::Hard),
    ]);
    AssessmentService::new(pinned_clock(), Arc::new(repo))
        .with_settings(SessionSettings::new(seconds, false).unwrap())
}

async fn spawn(seconds: u32) -> SessionHandle {
    service(seconds).spawn_session().await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn correct_incorrect_timeout_run_summarizes() {
    let mut handle = spawn(3).await;

    handle.select(0).await.unwrap();
    assert_eq!(
        handle.submit().await.unwrap(),
        Transition::Answered { correct: true }
    );
    assert_eq!(
        handle.advance().await.unwrap(),
        Transition::Advanced { index: 1 }
    );

    handle.select(3).await.unwrap();
    assert_eq!(
        handle.submit().await.unwrap(),
        Transition::Answered { correct: false }
    );
    handle.advance().await.unwrap();

    // Third question is left to run out.
    let last = handle.wait_for_completion().await.unwrap();
    assert_eq!(last.phase, SessionPhase::Complete);
    assert_eq!(last.state.remaining_seconds(), 0);
    assert!(last.performance.is_some());

    let done = handle.finish().await.unwrap();
    assert_eq!(done.summary.score(), 1);
    assert_eq!(done.summary.total_questions(), 3);
    assert_eq!(done.summary.difficulty_tally().get(Difficulty::Easy), 1);
    assert_eq!(done.summary.difficulty_tally().get(Difficulty::Medium), 0);
    assert_eq!(done.summary.difficulty_tally().get(Difficulty::Hard), 0);
    assert_eq!(done.summary.completed_at(), pinned_now());
    assert_eq!(done.performance.tier(Difficulty::Easy).percent(), Some(100.0));
    assert_eq!(done.performance.tier(Difficulty::Hard).percent(), Some(0.0));
}

#[tokio::test(start_paused = true)]
async fn countdown_pauses_while_explanation_is_visible() {
    let mut handle = spawn(3).await;

    handle.select(1).await.unwrap();
    handle.submit().await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let snap = handle.snapshot();
    assert_eq!(snap.phase, SessionPhase::Explanation);
    assert_eq!(snap.state.current_index(), 0);
    assert_eq!(snap.state.remaining_seconds(), 3);
    assert_eq!(snap.explanation.as_deref(), Some("Explanation 1"));
}

#[tokio::test(start_paused = true)]
async fn countdown_restarts_in_full_for_each_question() {
    let mut handle = spawn(3).await;

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(handle.snapshot().state.remaining_seconds(), 1);

    handle.select(0).await.unwrap();
    handle.submit().await.unwrap();
    handle.advance().await.unwrap();
    let snap = handle.snapshot();
    assert_eq!(snap.state.current_index(), 1);
    assert_eq!(snap.state.remaining_seconds(), 3);
    assert_eq!(snap.state.selected_option(), None);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(handle.snapshot().state.remaining_seconds(), 2);
}

#[tokio::test(start_paused = true)]
async fn unanswered_timeout_skips_to_next_question() {
    let mut handle = spawn(2).await;

    let mut snap = handle.changed().await.unwrap();
    while snap.state.current_index() == 0 {
        snap = handle.changed().await.unwrap();
    }
    assert_eq!(snap.phase, SessionPhase::Unanswered);
    assert_eq!(snap.state.remaining_seconds(), 2);
    assert_eq!(snap.state.score(), 0);
    assert_eq!(
        handle.submit().await.unwrap(),
        Transition::Unanswered(NextStep::Question(2))
    );
}

#[tokio::test(start_paused = true)]
async fn submit_queued_across_a_timeout_does_not_skip_the_next_question() {
    let mut handle = spawn(2).await;
    handle.select(0).await.unwrap();

    // Question 0 times out at 2 s; this submit was meant for it.
    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert_eq!(handle.submit().await.unwrap(), Transition::Ignored);

    let snap = handle.snapshot();
    assert_eq!(snap.phase, SessionPhase::Unanswered);
    assert_eq!(snap.state.current_index(), 1);
    assert_eq!(snap.state.remaining_seconds(), 2);
    assert_eq!(snap.state.selected_option(), None);
    assert_eq!(snap.state.score(), 0);

    // Commands aimed at a question that is already behind us stay no-ops.
    let late_select = SessionCommand::Select {
        question: 0,
        option: 1,
    };
    assert_eq!(handle.send(late_select).await.unwrap(), Transition::Ignored);
    assert_eq!(handle.snapshot().state.selected_option(), None);

    // The handle has caught up, so the next command lands on question 1.
    assert_eq!(handle.select(1).await.unwrap(), Transition::Selected(1));
    assert_eq!(
        handle.submit().await.unwrap(),
        Transition::Answered { correct: true }
    );
}

#[tokio::test(start_paused = true)]
async fn out_of_range_selection_is_rejected() {
    let mut handle = spawn(60).await;
    let err = handle.select(9).await.unwrap_err();
    assert!(matches!(err, ServiceError::Assessment(_)));
    assert_eq!(handle.snapshot().state.selected_option(), None);
}

#[tokio::test(start_paused = true)]
async fn finishing_early_reports_incomplete() {
    let mut handle = spawn(60).await;
    handle.select(0).await.unwrap();
    let err = handle.finish().await.unwrap_err();
    assert!(matches!(err, ServiceError::Incomplete));
}

#[tokio::test(start_paused = true)]
async fn restart_after_completion_starts_over() {
    let mut handle = spawn(1).await;
    handle.wait_for_completion().await.unwrap();

    assert_eq!(handle.restart().await.unwrap(), Transition::Restarted);
    let snap = handle.snapshot();
    assert!(!snap.progress.is_complete);
    assert_eq!(snap.state.current_index(), 0);
    assert_eq!(snap.state.remaining_seconds(), 1);
    assert!(snap.performance.is_none());
}
