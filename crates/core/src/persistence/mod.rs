//! Persistence adapter - maps a catalog to and from a JSON document.
//!
//! The catalog writes its full state through a [`CatalogStore`] after every
//! mutation. [`JsonFileStore`] is the durable backend; [`MemoryStore`] keeps
//! the document in memory for tests and throwaway catalogs.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::Book;

/// Serialized form of a whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDocument {
    /// Empty when the file carries no name.
    #[serde(default, deserialize_with = "crate::book::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Trait for catalog storage backends.
pub trait CatalogStore: Send + Sync {
    /// Human readable location, used in logs and API responses.
    fn location(&self) -> String;

    /// Load the stored document.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<LibraryDocument>, PersistenceError>;

    /// Replace the stored document.
    fn save(&self, document: &LibraryDocument) -> Result<(), PersistenceError>;
}

/// Errors for persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed library file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode library: {0}")]
    Encode(#[source] serde_json::Error),
}

/// File name for a library: lowercased, spaces to underscores, `_library.json`
/// suffix.
pub fn library_file_name(name: &str) -> String {
    format!("{}_library.json", name.to_lowercase().replace(' ', "_"))
}

/// Encode a document as pretty-printed JSON.
pub fn encode(document: &LibraryDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Decode a document, requiring `name` plus `title` and `author` on every book.
pub fn decode(text: &str) -> Result<LibraryDocument, serde_json::Error> {
    serde_json::from_str(text)
}
