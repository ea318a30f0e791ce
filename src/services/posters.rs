use std::sync::Arc;

use crate::{error::AppError, models::MovieCard, services::providers::PosterProvider};

/// Image shown when no poster could be fetched
pub const DEFAULT_POSTER: &str = "/static/content/default.png";

/// Resolves a poster URL, degrading every failure to [`DEFAULT_POSTER`]
pub async fn resolve_poster(provider: &dyn PosterProvider, title: &str) -> String {
    match provider.fetch_poster(title).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(
                title = %title,
                provider = provider.name(),
                error = %e,
                "Poster lookup failed, using placeholder"
            );
            DEFAULT_POSTER.to_string()
        }
    }
}

/// Resolves posters for all titles in parallel
///
/// Output order matches `titles`.
pub async fn resolve_posters(
    provider: Arc<dyn PosterProvider>,
    titles: &[String],
) -> Vec<MovieCard> {
    let tasks: Vec<_> = titles
        .iter()
        .cloned()
        .map(|title| {
            let provider = provider.clone();
            tokio::spawn(async move {
                let poster_url = resolve_poster(provider.as_ref(), &title).await;
                MovieCard::new(title, poster_url)
            })
        })
        .collect();

    let mut cards = Vec::with_capacity(tasks.len());

    for (task, title) in tasks.into_iter().zip(titles) {
        match task.await {
            Ok(card) => cards.push(card),
            Err(e) => {
                let err = AppError::Internal(format!("poster task for '{}' failed: {}", title, e));
                tracing::error!(title = %title, error = %err, "Poster task join error");
                cards.push(MovieCard::new(title.clone(), DEFAULT_POSTER));
            }
        }
    }

    let placeholders = cards
        .iter()
        .filter(|card| card.poster_url == DEFAULT_POSTER)
        .count();
    tracing::info!(
        titles = cards.len(),
        placeholders = placeholders,
        "Posters resolved"
    );

    cards
}
