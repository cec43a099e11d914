//! The book record and its matching rules.

mod status;

pub use status::BookStatus;

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::CatalogError;

/// A single book in a catalog.
///
/// This is also the on-disk record: `title` and `author` are required when
/// decoding, every other field falls back to its default when missing or
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BookStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Set once when the book is created, serialized as `YYYY-MM-DD`.
    #[serde(default = "today", deserialize_with = "date_or_today")]
    pub date_added: NaiveDate,
}

/// Input for creating a book.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub publication_year: Option<i32>,
    /// `None` means [`BookStatus::Available`].
    pub status: Option<BookStatus>,
    pub notes: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = isbn.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }

    pub fn with_status(mut self, status: impl Into<BookStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl Book {
    /// Build a book dated today, rejecting a blank title or author.
    pub fn new(input: NewBook) -> Result<Self, CatalogError> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::Validation("title is required".to_string()));
        }
        if input.author.trim().is_empty() {
            return Err(CatalogError::Validation("author is required".to_string()));
        }

        Ok(Self {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            genre: input.genre,
            publication_year: input.publication_year,
            status: input.status.unwrap_or_default(),
            notes: input.notes,
            date_added: today(),
        })
    }

    /// Whether `identifier` names this book: case-insensitive title or exact ISBN.
    ///
    /// A blank identifier never matches, not even a book whose ISBN is
    /// empty, so `remove("")` cannot drop an arbitrary ISBN-less book.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        if identifier.trim().is_empty() {
            return false;
        }
        self.title.to_lowercase() == identifier.to_lowercase() || self.isbn == identifier
    }

    /// Substring match against title, author, genre and ISBN.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.genre, &self.isbn]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.publication_year {
            Some(year) => write!(f, "{} by {} ({})", self.title, self.author, year),
            None => write!(f, "{} by {} (Unknown)", self.title, self.author),
        }
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn date_or_today<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NaiveDate>::deserialize(deserializer)?.unwrap_or_else(today))
}
