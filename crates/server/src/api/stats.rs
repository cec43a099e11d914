//! Stats API handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use bookshelf_core::CatalogStats;

use crate::state::AppState;

/// GET /api/stats
///
/// Aggregate counts over the whole catalog.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.catalog().stats())
}
