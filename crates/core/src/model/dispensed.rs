use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::question::QuestionRecord;

/// What a caller receives when a question is dispensed.
///
/// Never carries the answer; the canonical answer stays in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispensedQuestion {
    pub id: QuestionId,
    pub question: String,
    pub words: Vec<String>,
}

impl DispensedQuestion {
    #[must_use]
    pub fn from_record(record: &QuestionRecord) -> Self {
        Self {
            id: record.id().clone(),
            question: record.question().to_owned(),
            words: record
                .question()
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
        }
    }
}
