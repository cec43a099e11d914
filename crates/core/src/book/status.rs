//! Reading/lending status of a book.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status label attached to every book.
///
/// The well-known labels get their own variants; anything else a caller
/// supplies is kept verbatim in [`BookStatus::Other`] so it survives a
/// save/load cycle unchanged. Parsing is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
    Reading,
    Read,
    Wishlist,
    Other(String),
}

impl BookStatus {
    /// Labels offered to users when picking a status.
    pub const KNOWN: [BookStatus; 5] = [
        BookStatus::Available,
        BookStatus::Borrowed,
        BookStatus::Reading,
        BookStatus::Read,
        BookStatus::Wishlist,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
            BookStatus::Reading => "Reading",
            BookStatus::Read => "Read",
            BookStatus::Wishlist => "Wishlist",
            BookStatus::Other(label) => label,
        }
    }
}

impl From<String> for BookStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Available" => BookStatus::Available,
            "Borrowed" => BookStatus::Borrowed,
            "Reading" => BookStatus::Reading,
            "Read" => BookStatus::Read,
            "Wishlist" => BookStatus::Wishlist,
            _ => BookStatus::Other(label),
        }
    }
}

impl From<&str> for BookStatus {
    fn from(label: &str) -> Self {
        BookStatus::from(label.to_string())
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
