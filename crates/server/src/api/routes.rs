use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{books, handlers, middleware::metrics_middleware, stats};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and library info
        .route("/health", get(handlers::health))
        .route("/library", get(handlers::library_info))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search", get(books::search_books))
        .route("/books/{identifier}", delete(books::remove_book))
        .route("/books/{identifier}/status", put(books::update_status))
        // Aggregates
        .route("/stats", get(stats::get_stats));

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
