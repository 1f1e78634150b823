//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::assessment::AssessmentError;
use quiz_core::model::SessionSummaryError;
use storage::StorageError;

/// Errors emitted by the assessment service and session driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("session driver has stopped")]
    DriverClosed,
    #[error("session is not complete")]
    Incomplete,
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
