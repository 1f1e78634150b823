#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use repository::{
    DelayedSource, InMemoryRepository, JsonFileSource, QuestionRecord, QuestionSource, Storage,
    StorageError,
};
