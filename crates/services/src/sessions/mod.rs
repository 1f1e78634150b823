mod driver;
mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::ServiceError;
pub use driver::{CompletedSession, SessionCommand, SessionHandle, TICK_PERIOD};
pub use progress::SessionProgress;
pub use service::AssessmentService;
pub use view::SessionSnapshot;
