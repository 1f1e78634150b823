use thiserror::Error;

/// Countdown length applied to every question unless configured otherwise.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,
}

/// Per-session timing and timeout behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    seconds_per_question: u32,
    reveal_explanation_on_timeout: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            reveal_explanation_on_timeout: false,
        }
    }
}

impl SessionSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSecondsPerQuestion` for a zero countdown.
    pub fn new(
        seconds_per_question: u32,
        reveal_explanation_on_timeout: bool,
    ) -> Result<Self, SettingsError> {
        if seconds_per_question == 0 {
            return Err(SettingsError::InvalidSecondsPerQuestion);
        }
        Ok(Self {
            seconds_per_question,
            reveal_explanation_on_timeout,
        })
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    /// When false (the default), a timeout with no selection skips the
    /// explanation and moves straight on; when true it shows the explanation
    /// like an explicit wrong answer would.
    #[must_use]
    pub fn reveal_explanation_on_timeout(&self) -> bool {
        self.reveal_explanation_on_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sixty_seconds_and_skip_on_timeout() {
        let settings = SessionSettings::default();
        assert_eq!(settings.seconds_per_question(), 60);
        assert!(!settings.reveal_explanation_on_timeout());
    }

    #[test]
    fn zero_seconds_is_rejected() {
        assert_eq!(
            SessionSettings::new(0, false),
            Err(SettingsError::InvalidSecondsPerQuestion)
        );
    }
}
