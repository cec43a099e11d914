//! Aggregate statistics over a catalog's books.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::book::{Book, BookStatus};

/// Catalog statistics.
///
/// An empty catalog serializes as `{"totalBooks": 0}` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    #[serde(flatten)]
    pub breakdown: Option<StatsBreakdown>,
}

/// Frequency tables, present only when the catalog has books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBreakdown {
    /// Books per genre, books without a genre skipped.
    pub genres: BTreeMap<String, usize>,
    pub statuses: BTreeMap<String, usize>,
    pub authors: BTreeMap<String, usize>,
    /// Books per publication year, books without a year skipped.
    pub years: BTreeMap<i32, usize>,
    pub top_genre: Option<String>,
    pub top_author: Option<String>,
    pub reading_progress: ReadingProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    /// Books whose status is exactly `Read`.
    pub books_read_this_year: usize,
    /// Always 0: no history of status changes is kept.
    pub books_read_last_year: usize,
    /// Books whose status is exactly `Reading`.
    pub currently_reading: usize,
}

impl CatalogStats {
    pub fn compute(books: &[Book]) -> Self {
        if books.is_empty() {
            return Self {
                total_books: 0,
                breakdown: None,
            };
        }

        let genres = Tally::count(
            books
                .iter()
                .map(|b| b.genre.as_str())
                .filter(|g| !g.is_empty()),
        );
        let statuses = Tally::count(books.iter().map(|b| b.status.as_str()));
        let authors = Tally::count(books.iter().map(|b| b.author.as_str()));
        let years = Tally::count(books.iter().filter_map(|b| b.publication_year));

        let reading_progress = ReadingProgress {
            books_read_this_year: statuses.get(BookStatus::Read.as_str()),
            books_read_last_year: 0,
            currently_reading: statuses.get(BookStatus::Reading.as_str()),
        };

        Self {
            total_books: books.len(),
            breakdown: Some(StatsBreakdown {
                top_genre: genres.top().map(str::to_string),
                top_author: authors.top().map(str::to_string),
                genres: genres.into_map(|g| g.to_string()),
                statuses: statuses.into_map(|s| s.to_string()),
                authors: authors.into_map(|a| a.to_string()),
                years: years.into_map(|y| y),
                reading_progress,
            }),
        }
    }
}

/// Counts in first-seen order, so the winner of a tie is the value that
/// appears earliest in the catalog.
struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K: PartialEq + Copy> Tally<K> {
    fn count(values: impl Iterator<Item = K>) -> Self {
        let mut entries: Vec<(K, usize)> = Vec::new();
        for value in values {
            match entries.iter_mut().find(|(key, _)| *key == value) {
                Some((_, count)) => *count += 1,
                None => entries.push((value, 1)),
            }
        }
        Self { entries }
    }

    fn get(&self, key: K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Highest count, earliest entry on ties.
    fn top(&self) -> Option<K> {
        let mut best: Option<(K, usize)> = None;
        for &(key, count) in &self.entries {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }

    fn into_map<M: Ord>(self, key: impl Fn(K) -> M) -> BTreeMap<M, usize> {
        self.entries.into_iter().map(|(k, c)| (key(k), c)).collect()
    }
}
