use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use movie_matcher::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::CatalogEntry,
    recommender::{Metric, Model, NearestNeighbors, SparseVector, TfidfVectorizer},
    services::{recommendations::POPULAR_MOVIES, PosterProvider, DEFAULT_POSTER},
};

/// Serves posters from a fixed table; every other title is a failed lookup
struct StaticPosters(HashMap<&'static str, &'static str>);

#[async_trait::async_trait]
impl PosterProvider for StaticPosters {
    async fn fetch_poster(&self, title: &str) -> AppResult<String> {
        self.0
            .get(title)
            .map(|url| url.to_string())
            .ok_or_else(|| AppError::ExternalApi("OMDb API returned status 503".to_string()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

fn create_test_model() -> Model {
    let catalog = [
        ("Interstellar", "space travel astronaut wormhole"),
        ("Inside Man", "bank heist hostage detective"),
        ("Grown Ups", "family comedy friends"),
        ("Harry Potter", "wizard school magic"),
        ("Train to Busan", "zombie train survival"),
        ("Django Unchained", "western slavery revenge"),
        ("Hook", "pirate neverland adventure"),
    ];

    let mut vocabulary = HashMap::new();
    let mut rows = Vec::new();
    for (_, features) in &catalog {
        let mut entries = Vec::new();
        for word in features.split_whitespace() {
            let next = vocabulary.len();
            let column = *vocabulary.entry(word.to_string()).or_insert(next);
            entries.push((column, 1.0));
        }
        let norm = (entries.len() as f32).sqrt();
        rows.push(SparseVector::new(
            entries.into_iter().map(|(c, v)| (c, v / norm)).collect(),
        ));
    }

    let idf = vec![1.0; vocabulary.len()];
    let vectorizer = TfidfVectorizer::new(vocabulary, idf).unwrap();

    Model::from_parts(
        vectorizer,
        NearestNeighbors::new(Metric::Cosine, rows),
        catalog
            .iter()
            .map(|(title, features)| CatalogEntry {
                title: title.to_string(),
                features: features.to_string(),
            })
            .collect(),
    )
    .unwrap()
}

fn create_test_server() -> (TestServer, tempfile::TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(static_dir.path().join("content")).unwrap();
    std::fs::write(static_dir.path().join("content/default.png"), b"png").unwrap();

    let posters = StaticPosters(HashMap::from([
        ("Interstellar", "https://img.example/interstellar.jpg"),
        ("The Matrix", "https://img.example/matrix.jpg"),
    ]));

    let state = AppState::new(create_test_model(), Arc::new(posters));
    let app = create_router(state, static_dir.path());
    (TestServer::new(app).unwrap(), static_dir)
}

/// Titles rendered in the results grid, in page order
fn rendered_titles(page: &str) -> Vec<String> {
    page.split("<h5 class=\"card-title\">")
        .skip(1)
        .filter_map(|chunk| chunk.split("</h5>").next())
        .map(|t| t.replace("&amp;", "&").replace("&#x27;", "'"))
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let (server, _dir) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_renders_empty_form() {
    let (server, _dir) = create_test_server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let page = response.text();
    assert!(page.contains("name=\"query\""));
    assert!(rendered_titles(&page).is_empty());
    assert!(!page.contains("couldn\u{2019}t understand"));
}

#[tokio::test]
async fn test_post_matching_query_renders_catalog_titles() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/")
        .form(&json!({ "query": "Astronaut in SPACE, through a wormhole!" }))
        .await;
    response.assert_status_ok();

    let page = response.text();
    let titles = rendered_titles(&page);
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], "Interstellar");
    assert!(page.contains("src=\"https://img.example/interstellar.jpg\""));
    assert!(page.contains(&format!("src=\"{}\"", DEFAULT_POSTER)));
    assert!(page.contains("value=\"Astronaut in SPACE, through a wormhole!\""));
    assert!(!page.contains("couldn\u{2019}t understand"));
}

#[tokio::test]
async fn test_post_gibberish_falls_back_to_five_popular_titles() {
    let (server, _dir) = create_test_server();

    for _ in 0..10 {
        let response = server
            .post("/")
            .form(&json!({ "query": "qwxz plorf" }))
            .await;
        response.assert_status_ok();

        let page = response.text();
        assert!(page.contains(
            "We couldn\u{2019}t understand your search, but here are 5 recommendations!"
        ));

        let titles = rendered_titles(&page);
        assert_eq!(titles.len(), 5);
        assert!(titles.iter().all(|t| POPULAR_MOVIES.contains(&t.as_str())));
    }
}

#[tokio::test]
async fn test_post_without_query_field_falls_back() {
    let (server, _dir) = create_test_server();

    let response = server.post("/").form(&json!({})).await;
    response.assert_status_ok();

    assert_eq!(rendered_titles(&response.text()).len(), 5);
}

#[tokio::test]
async fn test_query_is_escaped() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/")
        .form(&json!({ "query": "<script>alert(1)</script>" }))
        .await;
    response.assert_status_ok();

    let page = response.text();
    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_placeholder_served_from_static() {
    let (server, _dir) = create_test_server();

    let response = server.get(DEFAULT_POSTER).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"png");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (server, _dir) = create_test_server();

    let response = server.get("/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("/does-not-exist"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (server, _dir) = create_test_server();
    let id = "6f1c1b8e-3a4e-4a43-9b7f-2a1d5c0e9f11";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_generated_when_missing() {
    let (server, _dir) = create_test_server();

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}
