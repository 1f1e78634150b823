mod bank;
mod ids;
mod question;
mod session;
mod settings;
mod tally;

pub use bank::{QuestionBank, QuestionBankError};
pub use ids::{ParseIdError, QuestionId};
pub use question::{Difficulty, OPTION_COUNT, Question, QuestionDraft, QuestionError};
pub use session::{SessionSummary, SessionSummaryError};
pub use settings::{DEFAULT_SECONDS_PER_QUESTION, SessionSettings, SettingsError};
pub use tally::DifficultyTally;
