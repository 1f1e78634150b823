use std::fmt;
use std::sync::Arc;

use quiz_core::assessment::AssessmentSession;
use quiz_core::model::{QuestionBank, SessionSettings};
use storage::QuestionSource;
use tracing::debug;

use super::driver::SessionHandle;
use crate::Clock;
use crate::error::ServiceError;

/// Loads the question bank from the injected source and starts sessions.
#[derive(Clone)]
pub struct AssessmentService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    settings: SessionSettings,
}

impl AssessmentService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            clock,
            source,
            settings: SessionSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Fetch the bank from the source.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the source fails.
    pub async fn load_bank(&self) -> Result<Arc<QuestionBank>, ServiceError> {
        let bank = self.source.fetch_bank().await?;
        debug!(questions = bank.len(), "question bank loaded");
        Ok(Arc::new(bank))
    }

    /// Start a session the caller drives directly, one event at a time.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the bank cannot be loaded.
    pub async fn start_session(&self) -> Result<AssessmentSession, ServiceError> {
        let bank = self.load_bank().await?;
        Ok(AssessmentSession::new(bank, self.settings))
    }

    /// Start a session on its own task with a running countdown.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the bank cannot be loaded.
    pub async fn spawn_session(&self) -> Result<SessionHandle, ServiceError> {
        let session = self.start_session().await?;
        Ok(SessionHandle::spawn(session, self.clock))
    }
}

impl fmt::Debug for AssessmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentService")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
