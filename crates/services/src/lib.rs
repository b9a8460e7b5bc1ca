#![forbid(unsafe_code)]

pub mod app_services;
pub mod dispenser;
pub mod error;

pub use app_services::QuizServices;
pub use dispenser::QuestionDispenser;
pub use error::DispenseError;
