//! In-memory backend.

use std::sync::Mutex;

use super::{CatalogStore, LibraryDocument, PersistenceError};

/// Keeps the last saved document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<LibraryDocument>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously stored document.
    pub fn with_document(document: LibraryDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            saves: Mutex::new(0),
        }
    }

    /// The last saved document, if any.
    pub fn document(&self) -> Option<LibraryDocument> {
        self.document
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CatalogStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Result<Option<LibraryDocument>, PersistenceError> {
        Ok(self.document())
    }

    fn save(&self, document: &LibraryDocument) -> Result<(), PersistenceError> {
        *self.document.lock().unwrap_or_else(|e| e.into_inner()) = Some(document.clone());
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
