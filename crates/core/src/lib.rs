#![forbid(unsafe_code)]

pub mod assessment;
pub mod error;
pub mod model;
pub mod performance;
pub mod time;

pub use error::Error;
pub use time::Clock;
