use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Html,
    Extension, Form,
};
use serde::Deserialize;

use super::views::{self, PageContext};
use super::AppState;
use crate::{
    error::AppError,
    middleware::request_id::RequestId,
    services::{posters, recommendations},
};

// Request types

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Renders the empty search page
pub async fn home() -> Html<String> {
    Html(views::index_page(&PageContext::default()))
}

/// Matches the submitted query and renders the results grid
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    tracing::info!(
        request_id = %request_id,
        query = %form.query,
        "Processing search request"
    );

    let selection = {
        let mut rng = rand::thread_rng();
        recommendations::select_titles(&state.model, &form.query, &mut rng)
    };

    let movies = posters::resolve_posters(state.posters.clone(), &selection.titles).await;

    tracing::info!(
        request_id = %request_id,
        results = movies.len(),
        fallback = selection.fallback,
        "Search completed"
    );

    let message = selection
        .fallback
        .then_some(recommendations::LOW_CONFIDENCE_MESSAGE);

    Html(views::index_page(&PageContext {
        query: &form.query,
        message,
        movies: &movies,
    }))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}
