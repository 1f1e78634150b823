use thiserror::Error;

use crate::assessment::AssessmentError;
use crate::model::{QuestionBankError, QuestionError, SessionSummaryError, SettingsError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] QuestionBankError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
