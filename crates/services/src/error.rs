//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionId;
use storage::StoreError;

/// Errors emitted by `QuestionDispenser`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispenseError {
    #[error("no more unused questions available")]
    Exhausted,
    #[error("unknown question id: {id}")]
    UnknownQuestion { id: QuestionId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DispenseError {
    /// True for conditions the caller can correct (an id that is not, or no longer, known).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, DispenseError::UnknownQuestion { .. })
    }
}
