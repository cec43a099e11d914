//! Book catalog - the ordered collection of books for one named library.
//!
//! Every mutation rewrites the backing store before returning. All state sits
//! behind a single mutex, so concurrent callers (HTTP handlers) are serialized
//! and a save never interleaves with another mutation.

mod stats;
mod types;

pub use stats::{CatalogStats, ReadingProgress, StatsBreakdown};
pub use types::*;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use crate::book::{Book, BookStatus, NewBook};
use crate::persistence::{library_file_name, CatalogStore, JsonFileStore, LibraryDocument};

/// Name used when none is given.
pub const DEFAULT_LIBRARY_NAME: &str = "My Library";

struct CatalogState {
    name: String,
    books: Vec<Book>,
}

impl CatalogState {
    fn document(&self) -> LibraryDocument {
        LibraryDocument {
            name: self.name.clone(),
            books: self.books.clone(),
        }
    }

    fn position(&self, identifier: &str) -> Option<usize> {
        self.books
            .iter()
            .position(|book| book.matches_identifier(identifier))
    }
}

/// A named, persisted collection of books.
pub struct Catalog {
    state: Mutex<CatalogState>,
    store: Box<dyn CatalogStore>,
}

impl Catalog {
    /// Open a catalog, loading any state the store already holds.
    ///
    /// A missing or unreadable document yields an empty catalog named `name`.
    /// A loaded document keeps its own stored name unless that is blank.
    pub fn open(name: impl Into<String>, store: impl CatalogStore + 'static) -> Self {
        let mut state = CatalogState {
            name: name.into(),
            books: Vec::new(),
        };

        match store.load() {
            Ok(Some(document)) => {
                if !document.name.trim().is_empty() {
                    state.name = document.name;
                }
                state.books = document.books;
            }
            Ok(None) => {}
            Err(e) => error!("Error loading library: {}", e),
        }

        info!(
            "Opened library '{}' with {} books ({})",
            state.name,
            state.books.len(),
            store.location()
        );

        Self {
            state: Mutex::new(state),
            store: Box::new(store),
        }
    }

    /// Open the JSON-backed catalog for `name` inside `dir`.
    pub fn open_in_dir(dir: &Path, name: &str) -> Self {
        let path = dir.join(library_file_name(name));
        Self::open(name, JsonFileStore::new(path))
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write the full state through the store, logging on failure.
    fn persist(&self, state: &CatalogState) -> bool {
        match self.store.save(&state.document()) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving library: {}", e);
                false
            }
        }
    }

    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    /// Where the catalog is persisted.
    pub fn file_path(&self) -> String {
        self.store.location()
    }

    pub fn len(&self) -> usize {
        self.lock().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().books.is_empty()
    }

    /// Snapshot of all books in insertion order.
    pub fn books(&self) -> Vec<Book> {
        self.lock().books.clone()
    }

    /// Validate and append a new book.
    pub fn add(&self, input: NewBook) -> Result<Book, CatalogError> {
        let book = Book::new(input)?;
        Ok(self.add_book(book))
    }

    /// Append an already built book.
    pub fn add_book(&self, book: Book) -> Book {
        let mut state = self.lock();
        state.books.push(book.clone());
        self.persist(&state);
        debug!("Added: {}", book);
        book
    }

    /// Remove the first book matching `identifier` (title or ISBN).
    pub fn remove(&self, identifier: &str) -> Result<Book, CatalogError> {
        let mut state = self.lock();
        let Some(index) = state.position(identifier) else {
            warn!("Book '{}' not found in library", identifier);
            return Err(CatalogError::NotFound(identifier.to_string()));
        };

        let removed = state.books.remove(index);
        self.persist(&state);
        debug!("Removed: {}", removed);
        Ok(removed)
    }

    /// Books whose title, author, genre or ISBN contain `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        self.lock()
            .books
            .iter()
            .filter(|book| book.matches_query(&needle))
            .cloned()
            .collect()
    }

    /// All books, stably sorted by `key`.
    pub fn list(&self, key: SortKey) -> Vec<Book> {
        let mut books = self.books();
        books.sort_by(key.comparator());
        books
    }

    /// Set the status of the first book matching `identifier`.
    pub fn update_status(
        &self,
        identifier: &str,
        status: impl Into<BookStatus>,
    ) -> Result<Book, CatalogError> {
        let status = status.into();
        let mut state = self.lock();
        let Some(index) = state.position(identifier) else {
            warn!("Book '{}' not found in library", identifier);
            return Err(CatalogError::NotFound(identifier.to_string()));
        };

        state.books[index].status = status;
        let updated = state.books[index].clone();
        self.persist(&state);
        debug!("Updated status of '{}' to '{}'", updated.title, updated.status);
        Ok(updated)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(&self.lock().books)
    }

    /// Rewrite the store with the current state.
    pub fn save(&self) -> bool {
        let state = self.lock();
        let saved = self.persist(&state);
        if saved {
            info!("Library saved to {}", self.store.location());
        }
        saved
    }
}
