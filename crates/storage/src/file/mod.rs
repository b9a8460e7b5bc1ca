use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::SystemTime;

use quiz_core::model::QuestionSet;
use tracing::{info, warn};

use crate::repository::{QuestionSource, StoreError};

mod parse;

pub use parse::{DELIMITER, ParsedQuestions, parse_questions};

struct Cached {
    set: Arc<QuestionSet>,
    modified: SystemTime,
}

/// Question store backed by a pipe-delimited text file.
///
/// The file's modification time is checked before every read. When it differs
/// from the time recorded at the last successful load, the file is re-parsed
/// and the snapshot swapped under the write lock. There is no background
/// polling; reloads happen on the calling thread.
pub struct FileQuestionStore {
    path: PathBuf,
    state: RwLock<Option<Cached>>,
}

impl FileQuestionStore {
    /// Open the store and load the file once.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ResourceNotFound` if the file is missing and
    /// `StoreError::EmptyStore` if it holds no valid lines.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            state: RwLock::new(None),
        };
        store.force_reload()?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-parse the file regardless of its modification time.
    ///
    /// # Errors
    ///
    /// Same as [`FileQuestionStore::open`]. On failure the previous snapshot is kept.
    pub fn force_reload(&self) -> Result<Arc<QuestionSet>, StoreError> {
        let modified = self.probe()?;
        let mut state = self.write_state();
        self.reload_into(&mut state, modified)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<Cached>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn probe(&self) -> Result<SystemTime, StoreError> {
        let meta = fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        if !meta.is_file() {
            return Err(self.not_found());
        }
        meta.modified().map_err(|e| self.io_error(e))
    }

    fn reload_into(
        &self,
        state: &mut Option<Cached>,
        modified: SystemTime,
    ) -> Result<Arc<QuestionSet>, StoreError> {
        match self.load() {
            Ok(set) => {
                let set = Arc::new(set);
                *state = Some(Cached {
                    set: Arc::clone(&set),
                    modified,
                });
                Ok(set)
            }
            Err(err) => {
                if state.is_some() {
                    warn!(path = %self.path.display(), %err, "reload failed, keeping previous questions");
                }
                Err(err)
            }
        }
    }

    fn load(&self) -> Result<QuestionSet, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let ParsedQuestions { set, skipped } = parse_questions(&text);

        if set.is_empty() {
            return Err(StoreError::EmptyStore {
                path: self.path.clone(),
            });
        }

        info!(
            path = %self.path.display(),
            questions = set.len(),
            skipped,
            "loaded questions"
        );
        Ok(set)
    }

    fn not_found(&self) -> StoreError {
        StoreError::ResourceNotFound {
            path: self.path.clone(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        if source.kind() == ErrorKind::NotFound {
            return self.not_found();
        }
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl QuestionSource for FileQuestionStore {
    fn snapshot(&self) -> Result<Arc<QuestionSet>, StoreError> {
        let modified = self.probe()?;

        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = state.as_ref() {
                if cached.modified == modified {
                    return Ok(Arc::clone(&cached.set));
                }
            }
        }

        let mut state = self.write_state();
        // Another caller may have reloaded while we waited for the lock.
        if let Some(cached) = state.as_ref() {
            if cached.modified == modified {
                return Ok(Arc::clone(&cached.set));
            }
        }
        self.reload_into(&mut state, modified)
    }
}
