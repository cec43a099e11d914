//! Test fixtures shared by the core, server and menu tests.
//!
//! ```rust,ignore
//! use bookshelf_core::testing::fixtures;
//!
//! let catalog = fixtures::memory_catalog();
//! catalog.add(fixtures::dune()).unwrap();
//! ```

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::book::NewBook;
    use crate::catalog::{Catalog, DEFAULT_LIBRARY_NAME};
    use crate::persistence::MemoryStore;

    /// Empty catalog backed by a [`MemoryStore`].
    pub fn memory_catalog() -> Catalog {
        Catalog::open(DEFAULT_LIBRARY_NAME, MemoryStore::new())
    }

    pub fn dune() -> NewBook {
        NewBook::new("Dune", "Frank Herbert")
            .with_isbn("9780441013593")
            .with_genre("Science Fiction")
            .with_year(1965)
            .with_status("Read")
    }

    pub fn foundation() -> NewBook {
        NewBook::new("Foundation", "Isaac Asimov")
            .with_isbn("9780553293357")
            .with_genre("Science Fiction")
            .with_year(1951)
    }

    pub fn emma() -> NewBook {
        NewBook::new("Emma", "Jane Austen")
            .with_genre("Romance")
            .with_status("Reading")
    }

    /// A catalog holding [`dune`], [`foundation`] and [`emma`] in that order.
    pub fn sample_catalog() -> Catalog {
        let catalog = memory_catalog();
        for book in [dune(), foundation(), emma()] {
            catalog
                .add(book)
                .expect("fixture books have a title and author");
        }
        catalog
    }
}
