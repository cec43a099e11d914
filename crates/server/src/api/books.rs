//! Book API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bookshelf_core::{Book, BookStatus, CatalogError, NewBook, SortKey};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListBooksParams {
    /// One of `title`, `author`, `year`, `date_added`; anything else keeps
    /// insertion order.
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_sort() -> String {
    SortKey::Title.as_str().to_string()
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Request body for adding a book
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, alias = "publication_year")]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateBookBody> for NewBook {
    fn from(body: CreateBookBody) -> Self {
        NewBook {
            title: body.title.unwrap_or_default(),
            author: body.author.unwrap_or_default(),
            isbn: body.isbn.unwrap_or_default(),
            genre: body.genre.unwrap_or_default(),
            publication_year: body.publication_year,
            status: body
                .status
                .filter(|s| !s.is_empty())
                .map(BookStatus::from),
            notes: body.notes.unwrap_or_default(),
        }
    }
}

/// Request body for changing a book's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    #[serde(default)]
    pub status: Option<String>,
}

/// Successful mutation of a single book
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub book: Book,
}

impl BookResponse {
    fn ok(book: Book) -> Self {
        Self {
            success: true,
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

fn failure(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.into(),
        }),
    )
}

fn catalog_failure(error: CatalogError) -> (StatusCode, Json<ErrorResponse>) {
    match error {
        CatalogError::NotFound(_) => failure(StatusCode::NOT_FOUND, "Book not found"),
        CatalogError::Validation(message) => failure(StatusCode::BAD_REQUEST, message),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/books?sort=title
///
/// List every book in the requested order.
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListBooksParams>,
) -> Json<Vec<Book>> {
    Json(state.catalog().list(SortKey::parse(&params.sort)))
}

/// POST /api/books
///
/// Add a book. Title and author are required.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookBody>,
) -> Result<(StatusCode, Json<Book>), impl IntoResponse> {
    match state.catalog().add(NewBook::from(body)) {
        Ok(book) => {
            info!("Added book '{}'", book.title);
            Ok((StatusCode::CREATED, Json(book)))
        }
        Err(e) => Err(catalog_failure(e)),
    }
}

/// GET /api/books/search?q=
///
/// Case-insensitive substring search over title, author, genre and ISBN.
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Book>> {
    Json(state.catalog().search(&params.q))
}

/// DELETE /api/books/{identifier}
///
/// Remove the first book whose title (any case) or ISBN matches.
pub async fn remove_book(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<BookResponse>, impl IntoResponse> {
    match state.catalog().remove(&identifier) {
        Ok(book) => {
            info!("Removed book '{}'", book.title);
            Ok(Json(BookResponse::ok(book)))
        }
        Err(e) => Err(catalog_failure(e)),
    }
}

/// PUT /api/books/{identifier}/status
///
/// Set the status of the first matching book. Any label is accepted.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<BookResponse>, impl IntoResponse> {
    let Some(status) = body.status.filter(|s| !s.trim().is_empty()) else {
        return Err(failure(StatusCode::BAD_REQUEST, "status is required"));
    };

    match state.catalog().update_status(&identifier, status) {
        Ok(book) => {
            info!("Book '{}' is now '{}'", book.title, book.status);
            Ok(Json(BookResponse::ok(book)))
        }
        Err(e) => Err(catalog_failure(e)),
    }
}
