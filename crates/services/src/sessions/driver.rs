use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::assessment::{AssessmentError, AssessmentEvent, AssessmentSession, Transition};
use quiz_core::model::SessionSummary;
use quiz_core::performance::PerformanceReport;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use super::view::SessionSnapshot;
use crate::Clock;
use crate::error::ServiceError;

/// Cadence of the per-question countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const COMMAND_BUFFER: usize = 16;

/// User-initiated inputs; ticks come from the driver's own timer.
///
/// `question` is the index the sender was looking at. The driver ignores a
/// command whose question has already been left, such as a submit that was
/// still queued when that question timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Select { question: usize, option: usize },
    Submit { question: usize },
    Advance { question: usize },
    Restart,
}

impl SessionCommand {
    /// The question this command is aimed at; `None` for restart.
    #[must_use]
    pub fn question(self) -> Option<usize> {
        match self {
            SessionCommand::Select { question, .. }
            | SessionCommand::Submit { question }
            | SessionCommand::Advance { question } => Some(question),
            SessionCommand::Restart => None,
        }
    }

    fn is_stale(self, current_index: usize) -> bool {
        self.question().is_some_and(|question| question != current_index)
    }
}

impl From<SessionCommand> for AssessmentEvent {
    fn from(command: SessionCommand) -> Self {
        match command {
            SessionCommand::Select { option, .. } => AssessmentEvent::Select(option),
            SessionCommand::Submit { .. } => AssessmentEvent::Submit,
            SessionCommand::Advance { .. } => AssessmentEvent::Advance,
            SessionCommand::Restart => AssessmentEvent::Restart,
        }
    }
}

/// Final outcome handed back by [`SessionHandle::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSession {
    pub summary: SessionSummary,
    pub performance: PerformanceReport,
}

struct Envelope {
    command: SessionCommand,
    reply: oneshot::Sender<Receipt>,
}

/// Outcome of one command plus the question the session is on afterwards.
struct Receipt {
    result: Result<Transition, AssessmentError>,
    current_index: usize,
}

struct DriverExit {
    session: AssessmentSession,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Owns one session on a dedicated task and applies events to it in order.
struct SessionDriver {
    session: AssessmentSession,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    commands: mpsc::Receiver<Envelope>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionDriver {
    async fn run(mut self) -> DriverExit {
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let timer_active = self.session.timer_active();
            tokio::select! {
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        break;
                    };
                    let current_index = self.session.state().current_index();
                    let result = if command.is_stale(current_index) {
                        debug!(?command, current_index, "command for a past question ignored");
                        Ok(Transition::Ignored)
                    } else {
                        self.session.dispatch(command.into())
                    };
                    if let Ok(transition) = result {
                        debug!(?command, ?transition, "session command applied");
                        self.after_transition(transition, &mut ticker);
                    }
                    // The caller may have stopped waiting; the state change stands.
                    let _ = reply.send(Receipt {
                        result,
                        current_index: self.session.state().current_index(),
                    });
                }
                _ = ticker.tick(), if timer_active => {
                    let transition = self.session.tick();
                    if !matches!(transition, Transition::Ticked { .. }) {
                        debug!(?transition, "countdown expired");
                    }
                    self.after_transition(transition, &mut ticker);
                }
            }
        }

        DriverExit {
            session: self.session,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    fn after_transition(&mut self, transition: Transition, ticker: &mut tokio::time::Interval) {
        match transition {
            Transition::Ignored => return,
            Transition::Selected(_) | Transition::Ticked { .. } => {}
            Transition::Restarted => {
                self.started_at = self.clock.now();
                self.completed_at = None;
                ticker.reset();
                info!("assessment session restarted");
            }
            Transition::Answered { .. }
            | Transition::TimedOut(_)
            | Transition::Unanswered(_)
            | Transition::Advanced { .. }
            | Transition::Completed => {
                // A new question (or none) gets a fresh full period.
                ticker.reset();
            }
        }

        if self.session.state().is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
            info!(
                score = self.session.state().score(),
                total = self.session.bank().len(),
                "assessment session complete"
            );
        }

        self.snapshots
            .send_replace(SessionSnapshot::capture(&self.session));
    }
}

/// Client side of a running session driver.
///
/// The handle remembers the last question it reported to its caller (through
/// a command reply, [`snapshot`](Self::snapshot), [`changed`](Self::changed)
/// or [`wait_for_completion`](Self::wait_for_completion)) and aims
/// `select`/`submit`/`advance` at that question.
///
/// Dropping the handle stops the driver; use [`SessionHandle::finish`] to
/// collect the result.
pub struct SessionHandle {
    commands: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<DriverExit>,
    question: usize,
}

impl SessionHandle {
    /// Spawn a driver task that owns `session`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(session: AssessmentSession, clock: Clock) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshots_tx, snapshots_rx) = watch::channel(SessionSnapshot::capture(&session));
        let question = session.state().current_index();

        info!(
            questions = session.bank().len(),
            seconds_per_question = session.settings().seconds_per_question(),
            "assessment session started"
        );

        let driver = SessionDriver {
            session,
            clock,
            started_at: clock.now(),
            completed_at: None,
            commands: commands_rx,
            snapshots: snapshots_tx,
        };
        let task = tokio::spawn(driver.run());

        Self {
            commands: commands_tx,
            snapshots: snapshots_rx,
            task,
            question,
        }
    }

    /// Send a command and wait for the transition it produced.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Assessment` if the command is invalid, or
    /// `ServiceError::DriverClosed` if the driver is gone.
    pub async fn send(&mut self, command: SessionCommand) -> Result<Transition, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| ServiceError::DriverClosed)?;
        let receipt = response.await.map_err(|_| ServiceError::DriverClosed)?;
        self.question = receipt.current_index;
        Ok(receipt.result?)
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub async fn select(&mut self, option: usize) -> Result<Transition, ServiceError> {
        let question = self.question;
        self.send(SessionCommand::Select { question, option }).await
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub async fn submit(&mut self) -> Result<Transition, ServiceError> {
        let question = self.question;
        self.send(SessionCommand::Submit { question }).await
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub async fn advance(&mut self) -> Result<Transition, ServiceError> {
        let question = self.question;
        self.send(SessionCommand::Advance { question }).await
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub async fn restart(&mut self) -> Result<Transition, ServiceError> {
        self.send(SessionCommand::Restart).await
    }

    /// Latest published snapshot; later commands are aimed at its question.
    #[must_use]
    pub fn snapshot(&mut self) -> SessionSnapshot {
        let snapshot = self.snapshots.borrow_and_update().clone();
        self.question = snapshot.state.current_index();
        snapshot
    }

    /// A receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the next snapshot after the last one seen through this handle.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::DriverClosed` if the driver stopped.
    pub async fn changed(&mut self) -> Result<SessionSnapshot, ServiceError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| ServiceError::DriverClosed)?;
        Ok(self.snapshot())
    }

    /// Wait until the session reaches its terminal state.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::DriverClosed` if the driver stopped first.
    pub async fn wait_for_completion(&mut self) -> Result<SessionSnapshot, ServiceError> {
        let snapshot = self
            .snapshots
            .wait_for(|snap| snap.progress.is_complete)
            .await
            .map_err(|_| ServiceError::DriverClosed)?
            .clone();
        self.question = snapshot.state.current_index();
        Ok(snapshot)
    }

    /// Stop the driver and summarize the session.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Incomplete` if the session had not finished,
    /// or `ServiceError::DriverClosed` if the driver task failed.
    pub async fn finish(self) -> Result<CompletedSession, ServiceError> {
        let Self { commands, task, .. } = self;
        drop(commands);

        let exit = task.await.map_err(|_| ServiceError::DriverClosed)?;
        let completed_at = exit.completed_at.ok_or(ServiceError::Incomplete)?;
        let summary = SessionSummary::from_session(&exit.session, exit.started_at, completed_at)?;
        let state = exit.session.state();
        let performance = PerformanceReport::compute(exit.session.bank(), state.difficulty_tally());

        Ok(CompletedSession {
            summary,
            performance,
        })
    }
}
