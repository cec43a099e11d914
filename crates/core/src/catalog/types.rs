//! Types for catalog queries and errors.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::book::Book;

/// Ordering applied by [`Catalog::list`](super::Catalog::list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    /// Publication year, books without a year last.
    Year,
    DateAdded,
    /// Keep insertion order.
    Insertion,
}

impl SortKey {
    /// Parse a sort key name, falling back to [`SortKey::Insertion`] for
    /// anything unrecognized.
    pub fn parse(name: &str) -> Self {
        match name {
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "year" => SortKey::Year,
            "date_added" => SortKey::DateAdded,
            _ => SortKey::Insertion,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Year => "year",
            SortKey::DateAdded => "date_added",
            SortKey::Insertion => "insertion",
        }
    }

    /// Comparator for this key. `Insertion` treats every pair as equal so a
    /// stable sort leaves the order untouched.
    pub fn comparator(self) -> fn(&Book, &Book) -> Ordering {
        match self {
            SortKey::Title => by_title,
            SortKey::Author => by_author,
            SortKey::Year => by_year,
            SortKey::DateAdded => by_date_added,
            SortKey::Insertion => keep_order,
        }
    }
}

fn by_title(a: &Book, b: &Book) -> Ordering {
    a.title.cmp(&b.title)
}

fn by_author(a: &Book, b: &Book) -> Ordering {
    a.author.cmp(&b.author)
}

fn by_year(a: &Book, b: &Book) -> Ordering {
    match (a.publication_year, b.publication_year) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_date_added(a: &Book, b: &Book) -> Ordering {
    a.date_added.cmp(&b.date_added)
}

fn keep_order(_: &Book, _: &Book) -> Ordering {
    Ordering::Equal
}

/// Errors for catalog operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book '{0}' not found")]
    NotFound(String),

    #[error("Invalid book: {0}")]
    Validation(String),
}
