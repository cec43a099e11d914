//! JSON file backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{decode, encode, CatalogStore, LibraryDocument, PersistenceError};

/// Stores a catalog as one pretty-printed JSON file.
///
/// Saves go to a sibling `.tmp` file first and are renamed over the target,
/// so a crash mid-write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<LibraryDocument>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No library file found at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let document = decode(&text).map_err(|source| PersistenceError::Decode {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "Loaded {} books from {}",
            document.books.len(),
            self.path.display()
        );
        Ok(Some(document))
    }

    fn save(&self, document: &LibraryDocument) -> Result<(), PersistenceError> {
        let text = encode(document).map_err(PersistenceError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, text).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(
            "Saved {} books to {}",
            document.books.len(),
            self.path.display()
        );
        Ok(())
    }
}
