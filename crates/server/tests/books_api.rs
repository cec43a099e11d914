//! API tests for the book endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{encode, TestFixture};

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

async fn add(fixture: &TestFixture, book: Value) {
    let response = fixture.post("/api/books", book).await;
    assert_status!(response, StatusCode::CREATED);
}

async fn seed(fixture: &TestFixture) {
    add(
        fixture,
        json!({
            "title": "Dune",
            "author": "Herbert",
            "isbn": "9780441013593",
            "genre": "Sci-Fi",
            "publicationYear": 1965,
            "status": "Read"
        }),
    )
    .await;
    add(
        fixture,
        json!({
            "title": "Foundation",
            "author": "Asimov",
            "genre": "Sci-Fi",
            "publicationYear": 1951
        }),
    )
    .await;
    add(
        fixture,
        json!({ "title": "Emma", "author": "Austen", "genre": "Romance" }),
    )
    .await;
}

// =============================================================================
// Health and library info
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/health").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "status", json!("ok"));
}

#[tokio::test]
async fn test_library_info() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/library").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "name", json!(common::LIBRARY_NAME));
    assert_json_path!(response.body, "totalBooks", json!(3));
    assert!(response.body["file"]
        .as_str()
        .unwrap()
        .ends_with("test_shelf_library.json"));
    assert_json_path!(
        response.body,
        "dataDir",
        json!(fixture.temp_dir.path().display().to_string())
    );
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_book_returns_record_and_persists() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/books",
            json!({ "title": "Dune", "author": "Herbert", "publicationYear": 1965 }),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_json_path!(response.body, "title", json!("Dune"));
    assert_json_path!(response.body, "publication_year", json!(1965));
    assert_json_path!(response.body, "status", json!("Available"));
    assert_json_path!(response.body, "isbn", json!(""));
    assert_eq!(response.body["date_added"].as_str().unwrap().len(), 10);

    let file = fixture.library_file_json();
    assert_eq!(file["name"], json!(common::LIBRARY_NAME));
    assert_eq!(file["books"][0]["title"], json!("Dune"));
    assert_eq!(file["books"][0]["publication_year"], json!(1965));
}

#[tokio::test]
async fn test_create_book_missing_title_is_rejected() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/books", json!({ "author": "Herbert" }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_json_path!(response.body, "success", json!(false));
    assert!(fixture.catalog.is_empty());
    assert!(!fixture.library_file().exists());
}

#[tokio::test]
async fn test_create_book_malformed_json() {
    let fixture = TestFixture::new();
    let response = fixture.post_raw("/api/books", "{\"title\": ").await;
    assert!(response.status.is_client_error());
    assert!(fixture.catalog.is_empty());
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_defaults_to_title_order() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Dune", "Emma", "Foundation"]);
}

#[tokio::test]
async fn test_list_by_year_puts_undated_last() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books?sort=year").await;
    assert_eq!(titles(&response.body), vec!["Foundation", "Dune", "Emma"]);
}

#[tokio::test]
async fn test_list_by_author() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books?sort=author").await;
    assert_eq!(titles(&response.body), vec!["Foundation", "Emma", "Dune"]);
}

#[tokio::test]
async fn test_list_unknown_sort_keeps_insertion_order() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books?sort=shelf").await;
    assert_eq!(titles(&response.body), vec!["Dune", "Foundation", "Emma"]);
}

#[tokio::test]
async fn test_list_empty_library() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/books").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_by_genre_substring() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books/search?q=sci").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Dune", "Foundation"]);
}

#[tokio::test]
async fn test_search_without_query_returns_all() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/books/search").await;
    assert_eq!(titles(&response.body).len(), 3);
}

// =============================================================================
// Remove
// =============================================================================

#[tokio::test]
async fn test_remove_by_title_case_insensitive() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.delete("/api/books/foundation").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "success", json!(true));
    assert_eq!(response.body["book"]["title"], json!("Foundation"));

    let file = fixture.library_file_json();
    assert_eq!(file["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_remove_by_isbn() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.delete("/api/books/9780441013593").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["book"]["title"], json!("Dune"));
}

#[tokio::test]
async fn test_remove_title_with_spaces() {
    let fixture = TestFixture::new();
    add(
        &fixture,
        json!({ "title": "The Left Hand of Darkness", "author": "Le Guin" }),
    )
    .await;

    let path = format!("/api/books/{}", encode("the left hand of darkness"));
    let response = fixture.delete(&path).await;
    assert_status!(response, StatusCode::OK);
    assert!(fixture.catalog.is_empty());
}

#[tokio::test]
async fn test_remove_duplicate_title_removes_one() {
    let fixture = TestFixture::new();
    add(&fixture, json!({ "title": "Dune", "author": "Herbert", "notes": "first" })).await;
    add(&fixture, json!({ "title": "Dune", "author": "Herbert", "notes": "second" })).await;

    let response = fixture.delete("/api/books/Dune").await;
    assert_eq!(response.body["book"]["notes"], json!("first"));

    let remaining = fixture.get("/api/books").await;
    assert_eq!(remaining.body[0]["notes"], json!("second"));
}

#[tokio::test]
async fn test_remove_missing_book_is_404() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.delete("/api/books/Neuromancer").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_json_path!(response.body, "success", json!(false));
    assert_json_path!(response.body, "message", json!("Book not found"));
    assert_eq!(fixture.catalog.len(), 3);
}

// =============================================================================
// Update status
// =============================================================================

#[tokio::test]
async fn test_update_status() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture
        .put("/api/books/emma/status", json!({ "status": "Reading" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "success", json!(true));
    assert_eq!(response.body["book"]["status"], json!("Reading"));

    let file = fixture.library_file_json();
    assert_eq!(file["books"][2]["status"], json!("Reading"));
}

#[tokio::test]
async fn test_update_status_custom_label() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture
        .put("/api/books/Dune/status", json!({ "status": "Lent to Sam" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["book"]["status"], json!("Lent to Sam"));
}

#[tokio::test]
async fn test_update_status_missing_book_leaves_file_alone() {
    let fixture = TestFixture::new();
    seed(&fixture).await;
    let before = std::fs::read_to_string(fixture.library_file()).unwrap();

    let response = fixture
        .put(
            "/api/books/nonexistent-isbn-or-title/status",
            json!({ "status": "Read" }),
        )
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_json_path!(response.body, "success", json!(false));

    let after = std::fs::read_to_string(fixture.library_file()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_status_requires_status() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.put("/api/books/Dune/status", json!({})).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Stats
// =============================================================================

#[tokio::test]
async fn test_stats_empty_library() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/stats").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!({ "totalBooks": 0 }));
}

#[tokio::test]
async fn test_stats_after_seed() {
    let fixture = TestFixture::new();
    seed(&fixture).await;

    let response = fixture.get("/api/stats").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "totalBooks", json!(3));
    assert_json_path!(response.body, "topGenre", json!("Sci-Fi"));
    assert_json_path!(response.body, "topAuthor", json!("Herbert"));
    assert_eq!(response.body["statuses"]["Read"], json!(1));
    assert_eq!(response.body["statuses"]["Available"], json!(2));
    assert_eq!(response.body["years"]["1951"], json!(1));
    assert_eq!(
        response.body["readingProgress"],
        json!({ "booksReadThisYear": 1, "booksReadLastYear": 0, "currentlyReading": 0 })
    );
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    seed(&fixture).await;
    fixture.get("/api/books/search?q=dune").await;

    let (status, body) = fixture.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("bookshelf_books_total"));
    assert!(body.contains("path=\"/api/books/search\""));
}
