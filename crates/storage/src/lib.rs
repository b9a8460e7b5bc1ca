#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::FileQuestionStore;
pub use repository::{InMemoryQuestionStore, QuestionSource, Storage, StoreError};
