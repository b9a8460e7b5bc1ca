use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use quiz_core::model::{QuestionId, QuestionRecord, QuestionSet};
use thiserror::Error;

use crate::file::FileQuestionStore;

/// Errors surfaced by question stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("questions file not found: {}", .path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("no questions found in {}", .path.display())]
    EmptyStore { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read access to the current question set.
///
/// Implementations decide whether the backing data changed before answering.
/// Callers get an immutable snapshot, so a concurrent reload never exposes a
/// half-replaced sequence/index pair.
pub trait QuestionSource: Send + Sync {
    /// Return the current snapshot, reloading first if the backing data changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ResourceNotFound` if the backing resource is gone,
    /// `StoreError::EmptyStore` if it holds no valid records.
    fn snapshot(&self) -> Result<Arc<QuestionSet>, StoreError>;

    /// All `(question, answer)` pairs in load order.
    ///
    /// # Errors
    ///
    /// Propagates `snapshot` failures.
    fn all_questions(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self.snapshot()?.pairs())
    }

    /// Look up a record by id; `Ok(None)` if the current set does not hold it.
    ///
    /// # Errors
    ///
    /// Propagates `snapshot` failures.
    fn lookup(&self, id: &QuestionId) -> Result<Option<QuestionRecord>, StoreError> {
        Ok(self.snapshot()?.lookup(id).cloned())
    }
}

const IN_MEMORY_PATH: &str = ":memory:";

/// Simple in-memory store for testing and prototyping.
///
/// `replace` swaps the whole set, which is how a file reload looks to readers.
#[derive(Clone, Default)]
pub struct InMemoryQuestionStore {
    set: Arc<RwLock<Arc<QuestionSet>>>,
}

impl InMemoryQuestionStore {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self {
            set: Arc::new(RwLock::new(Arc::new(QuestionSet::from_records(records)))),
        }
    }

    pub fn replace(&self, records: Vec<QuestionRecord>) {
        let mut guard = self.set.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(QuestionSet::from_records(records));
    }
}

impl QuestionSource for InMemoryQuestionStore {
    fn snapshot(&self) -> Result<Arc<QuestionSet>, StoreError> {
        let guard = self.set.read().unwrap_or_else(PoisonError::into_inner);
        if guard.is_empty() {
            return Err(StoreError::EmptyStore {
                path: PathBuf::from(IN_MEMORY_PATH),
            });
        }
        Ok(Arc::clone(&guard))
    }
}

/// Bundles the question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
}

impl Storage {
    /// Open a file-backed store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the initial load fails.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = FileQuestionStore::open(path)?;
        Ok(Self {
            questions: Arc::new(store),
        })
    }

    #[must_use]
    pub fn in_memory(records: Vec<QuestionRecord>) -> Self {
        Self {
            questions: Arc::new(InMemoryQuestionStore::new(records)),
        }
    }
}
