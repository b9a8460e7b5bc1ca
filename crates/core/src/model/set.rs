use std::collections::HashMap;

use crate::model::ids::QuestionId;
use crate::model::question::QuestionRecord;

/// Ordered question records plus the id index derived from them.
///
/// The index is only ever built from the records, so the two cannot diverge.
/// When two records share an id the later one wins in the index while the
/// sequence keeps both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    records: Vec<QuestionRecord>,
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionSet {
    #[must_use]
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.id().clone(), idx))
            .collect();
        Self { records, by_id }
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    #[must_use]
    pub fn lookup(&self, id: &QuestionId) -> Option<&QuestionRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Ordered `(question, answer)` pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.records
            .iter()
            .map(|r| (r.question().to_owned(), r.answer().to_owned()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
