#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::ServiceError;
pub use sessions::{
    AssessmentService, CompletedSession, SessionCommand, SessionHandle, SessionProgress,
    SessionSnapshot, TICK_PERIOD,
};
