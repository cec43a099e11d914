use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::{collect_dynamic_metrics, encode_metrics};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Which library this server is serving.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryInfoResponse {
    pub name: String,
    pub file: String,
    pub data_dir: String,
    pub total_books: usize,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn library_info(State(state): State<Arc<AppState>>) -> Json<LibraryInfoResponse> {
    let catalog = state.catalog();
    Json(LibraryInfoResponse {
        name: catalog.name(),
        file: catalog.file_path(),
        data_dir: state.config().library.data_dir.display().to_string(),
        total_books: catalog.len(),
    })
}

/// GET /metrics
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_dynamic_metrics(&state);
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
