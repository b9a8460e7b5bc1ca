use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("answer text cannot be empty")]
    EmptyAnswer,
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// A question/answer pair keyed by its stable id.
///
/// Records are immutable once built; a reload replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: QuestionId,
    question: String,
    answer: String,
}

impl QuestionRecord {
    /// Builds a record from raw question and answer text, trimming both.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either part is empty after trimming.
    pub fn new(question: &str, answer: &str) -> Result<Self, QuestionError> {
        let question = question.trim();
        let answer = answer.trim();

        if question.is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(Self {
            id: QuestionId::for_question(question),
            question: question.to_owned(),
            answer: answer.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
