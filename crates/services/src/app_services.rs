use std::path::Path;
use std::sync::Arc;

use storage::{QuestionSource, Storage};

use crate::dispenser::QuestionDispenser;
use crate::error::DispenseError;

/// Assembles the question store and dispenser for the request layer.
///
/// Built once at startup and handed out by `Arc`; nothing here is global.
#[derive(Clone)]
pub struct QuizServices {
    questions: Arc<dyn QuestionSource>,
    dispenser: Arc<QuestionDispenser>,
}

impl QuizServices {
    /// Build services backed by a questions file.
    ///
    /// # Errors
    ///
    /// Returns `DispenseError::Store` if the file is missing or has no valid questions.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DispenseError> {
        let storage = Storage::file(path)?;
        Ok(Self::from_storage(storage))
    }

    #[must_use]
    pub fn from_storage(storage: Storage) -> Self {
        let dispenser = Arc::new(QuestionDispenser::new(Arc::clone(&storage.questions)));
        Self {
            questions: storage.questions,
            dispenser,
        }
    }

    #[must_use]
    pub fn questions(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn dispenser(&self) -> Arc<QuestionDispenser> {
        Arc::clone(&self.dispenser)
    }
}
