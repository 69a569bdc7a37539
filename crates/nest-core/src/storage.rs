use std::sync::Mutex;

use nest_domain::{NestBook, ProgressRecord};

use crate::CoreError;

/// Key-value persistence for the dragon's progress record.
pub trait ProgressStore: Send + Sync {
    /// Returns the stored record, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<ProgressRecord>, CoreError>;
    /// Overwrites every field of the stored record.
    fn save(&self, record: &ProgressRecord) -> Result<(), CoreError>;
}

/// Persistence for nests and their transactions.
pub trait NestStorage: Send + Sync {
    /// Returns the stored book, or an empty one when nothing was saved yet.
    fn load_book(&self) -> Result<NestBook, CoreError>;
    fn save_book(&self, book: &NestBook) -> Result<(), CoreError>;
}

/// Process-local progress store.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    record: Mutex<Option<ProgressRecord>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    pub fn snapshot(&self) -> Option<ProgressRecord> {
        *self.record.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<Option<ProgressRecord>, CoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, record: &ProgressRecord) -> Result<(), CoreError> {
        *self.record.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(*record);
        Ok(())
    }
}

impl<T: ProgressStore + ?Sized> ProgressStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<ProgressRecord>, CoreError> {
        (**self).load()
    }

    fn save(&self, record: &ProgressRecord) -> Result<(), CoreError> {
        (**self).save(record)
    }
}
