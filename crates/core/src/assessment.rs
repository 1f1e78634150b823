//! Timed assessment session: the state machine behind one quiz run-through.
//!
//! A session walks an ordered [`QuestionBank`]. Each question starts
//! unanswered with a full countdown, can receive a selection, and is resolved
//! either by an explicit submit or by the countdown hitting zero. Exactly one
//! transition is applied per event; events that do not apply to the current
//! phase are ignored rather than treated as errors.

use std::sync::Arc;

use thiserror::Error;

use crate::model::{DifficultyTally, Question, QuestionBank, SessionSettings};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("option {option} is out of range for a question with {count} options")]
    OptionOutOfRange { option: usize, count: usize },
}

//
// ─── EVENTS & TRANSITIONS ─────────────────────────────────────────────────────
//

/// Discrete inputs accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentEvent {
    Select(usize),
    Tick,
    Submit,
    Advance,
    Restart,
}

/// Where a question ended up after being resolved without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    ExplanationShown,
    Question(usize),
    Completed,
}

/// What a single event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event does not apply in the current phase.
    Ignored,
    Selected(usize),
    Ticked { remaining_seconds: u32 },
    Answered { correct: bool },
    /// Countdown reached zero.
    TimedOut(NextStep),
    /// Submitted with nothing selected.
    Unanswered(NextStep),
    Advanced { index: usize },
    Completed,
    Restarted,
}

/// Coarse lifecycle phase, mirroring what a front-end would show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unanswered,
    Explanation,
    Complete,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Read-only view of the session's mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_index: usize,
    selected_option: Option<usize>,
    score: u32,
    remaining_seconds: u32,
    explanation_visible: bool,
    difficulty_tally: DifficultyTally,
    is_complete: bool,
    last_answer_correct: Option<bool>,
}

impl SessionState {
    fn fresh(seconds_per_question: u32) -> Self {
        Self {
            current_index: 0,
            selected_option: None,
            score: 0,
            remaining_seconds: seconds_per_question,
            explanation_visible: false,
            difficulty_tally: DifficultyTally::new(),
            is_complete: false,
            last_answer_correct: None,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    #[must_use]
    pub fn difficulty_tally(&self) -> &DifficultyTally {
        &self.difficulty_tally
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Correctness of the most recent explicit submission on the current
    /// question; `None` until one happens.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.last_answer_correct
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Owns the single authoritative [`SessionState`] for one run-through.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    bank: Arc<QuestionBank>,
    settings: SessionSettings,
    state: SessionState,
}

impl AssessmentSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, settings: SessionSettings) -> Self {
        let state = SessionState::fresh(settings.seconds_per_question());
        Self {
            bank,
            settings,
            state,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.state.current_index)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.state.is_complete {
            SessionPhase::Complete
        } else if self.state.explanation_visible {
            SessionPhase::Explanation
        } else {
            SessionPhase::Unanswered
        }
    }

    /// True while the countdown should be running.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.phase() == SessionPhase::Unanswered
    }

    /// Route an event to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::OptionOutOfRange` for a selection past the
    /// last option.
    pub fn dispatch(&mut self, event: AssessmentEvent) -> Result<Transition, AssessmentError> {
        match event {
            AssessmentEvent::Select(option) => self.select_option(option),
            AssessmentEvent::Tick => Ok(self.tick()),
            AssessmentEvent::Submit => Ok(self.submit()),
            AssessmentEvent::Advance => Ok(self.advance()),
            AssessmentEvent::Restart => Ok(self.restart()),
        }
    }

    /// Record (or replace) the pending choice for the current question.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::OptionOutOfRange` if `option` does not exist.
    pub fn select_option(&mut self, option: usize) -> Result<Transition, AssessmentError> {
        if !self.timer_active() {
            return Ok(Transition::Ignored);
        }
        let count = self.current_question().map_or(0, |q| q.options().len());
        if option >= count {
            return Err(AssessmentError::OptionOutOfRange { option, count });
        }

        self.state.selected_option = Some(option);
        Ok(Transition::Selected(option))
    }

    /// One second elapsed on the active question.
    pub fn tick(&mut self) -> Transition {
        if !self.timer_active() {
            return Transition::Ignored;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            return Transition::Ticked {
                remaining_seconds: self.state.remaining_seconds,
            };
        }

        // Time ran out: any pending choice is dropped, not scored.
        self.state.selected_option = None;
        Transition::TimedOut(self.resolve_unanswered())
    }

    /// Grade the pending choice and reveal the explanation.
    pub fn submit(&mut self) -> Transition {
        if !self.timer_active() {
            return Transition::Ignored;
        }

        let Some(selected) = self.state.selected_option else {
            return Transition::Unanswered(self.resolve_unanswered());
        };
        let Some(question) = self.bank.get(self.state.current_index) else {
            return Transition::Ignored;
        };

        let correct = question.is_correct(selected);
        if correct {
            self.state.score = self.state.score.saturating_add(1);
            self.state.difficulty_tally.increment(question.difficulty());
        }
        self.state.last_answer_correct = Some(correct);
        self.state.explanation_visible = true;

        Transition::Answered { correct }
    }

    /// Leave the explanation screen for the next question, or finish.
    pub fn advance(&mut self) -> Transition {
        if self.phase() != SessionPhase::Explanation {
            return Transition::Ignored;
        }
        match self.step_forward() {
            NextStep::Question(index) => Transition::Advanced { index },
            NextStep::Completed | NextStep::ExplanationShown => Transition::Completed,
        }
    }

    /// Discard all progress and start over on the same bank.
    pub fn restart(&mut self) -> Transition {
        self.state = SessionState::fresh(self.settings.seconds_per_question());
        Transition::Restarted
    }

    fn resolve_unanswered(&mut self) -> NextStep {
        if self.settings.reveal_explanation_on_timeout() {
            self.state.last_answer_correct = Some(false);
            self.state.explanation_visible = true;
            return NextStep::ExplanationShown;
        }
        self.step_forward()
    }

    fn step_forward(&mut self) -> NextStep {
        if self.state.current_index >= self.bank.last_index() {
            self.state.is_complete = true;
            return NextStep::Completed;
        }

        self.state.current_index += 1;
        self.state.selected_option = None;
        self.state.remaining_seconds = self.settings.seconds_per_question();
        self.state.explanation_visible = false;
        self.state.last_answer_correct = None;
        NextStep::Question(self.state.current_index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
