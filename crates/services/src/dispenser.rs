use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::seq::IndexedRandom;
use tracing::{debug, info};

use quiz_core::model::{DispensedQuestion, QuestionId, QuestionRecord};
use quiz_core::normalize::answers_match;
use storage::QuestionSource;

use crate::error::DispenseError;

/// Hands out questions without replacement and grades answers.
///
/// The set of dispensed ids lives for the lifetime of this value only; it is
/// not persisted and not shared between processes. A reload of the store may
/// leave stale ids in the set, which simply never match again.
pub struct QuestionDispenser {
    store: Arc<dyn QuestionSource>,
    used: Mutex<HashSet<QuestionId>>,
}

impl QuestionDispenser {
    #[must_use]
    pub fn new(store: Arc<dyn QuestionSource>) -> Self {
        Self {
            store,
            used: Mutex::new(HashSet::new()),
        }
    }

    fn used(&self) -> MutexGuard<'_, HashSet<QuestionId>> {
        self.used.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pick a not-yet-dispensed question uniformly at random and mark it used.
    ///
    /// # Errors
    ///
    /// Returns `DispenseError::Exhausted` once every question has been served,
    /// or `DispenseError::Store` if the store cannot be read.
    pub fn next_question(&self) -> Result<DispensedQuestion, DispenseError> {
        let set = self.store.snapshot()?;

        // Selection and insertion share one critical section so two callers
        // can never both take the last question.
        let mut used = self.used();
        let available: Vec<&QuestionRecord> = set
            .records()
            .iter()
            .filter(|record| !used.contains(record.id()))
            .collect();

        let chosen = available
            .choose(&mut rand::rng())
            .copied()
            .ok_or(DispenseError::Exhausted)?;
        used.insert(chosen.id().clone());
        let used_count = used.len();
        drop(used);

        debug!(id = %chosen.id(), used = used_count, "dispensed question");
        Ok(DispensedQuestion::from_record(chosen))
    }

    /// Check an answer against the stored one after normalizing both sides.
    ///
    /// An absent answer is simply wrong, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DispenseError::UnknownQuestion` if the id is not in the current
    /// question set, or `DispenseError::Store` if the store cannot be read.
    pub fn validate(&self, id: &QuestionId, answer: Option<&str>) -> Result<bool, DispenseError> {
        let set = self.store.snapshot()?;
        let record = set
            .lookup(id)
            .ok_or_else(|| DispenseError::UnknownQuestion { id: id.clone() })?;

        let correct = answers_match(record.answer(), answer);
        debug!(%id, correct, "validated answer");
        Ok(correct)
    }

    /// Forget every dispensed id.
    pub fn clear(&self) {
        let mut used = self.used();
        let cleared = used.len();
        used.clear();
        info!(cleared, "cleared used questions");
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used().len()
    }

    /// Number of questions in the current set that have not been dispensed yet.
    ///
    /// # Errors
    ///
    /// Returns `DispenseError::Store` if the store cannot be read.
    pub fn remaining(&self) -> Result<usize, DispenseError> {
        let set = self.store.snapshot()?;
        let used = self.used();
        Ok(set
            .records()
            .iter()
            .filter(|record| !used.contains(record.id()))
            .count())
    }

    /// All `(question, answer)` pairs from the store.
    ///
    /// # Errors
    ///
    /// Returns `DispenseError::Store` if the store cannot be read.
    pub fn all_questions(&self) -> Result<Vec<(String, String)>, DispenseError> {
        Ok(self.store.all_questions()?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
