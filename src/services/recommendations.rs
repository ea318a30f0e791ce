use rand::{seq::SliceRandom, Rng};

use crate::{
    models::{CatalogEntry, Match, Selection},
    recommender::{preprocess_query, Model},
};

/// Hand-picked titles shown when a query cannot be matched
pub const POPULAR_MOVIES: [&str; 23] = [
    "Avengers: Infinity War",
    "Mystery Lab",
    "Click",
    "Dallas Buyers Club",
    "Grown Ups",
    "Thomas & Friends: Marvelous Machinery: World of Tomorrow",
    "LEGO Marvel Super Heroes: Black Panther",
    "Innocent",
    "House of Cards",
    "ADAM SANDLER 100% FRESH",
    "Revolutionary Road",
    "LEGO Marvel Super Heroes: Avengers Reassembled!",
    "Django Unchained",
    "Batman: The Killing Joke",
    "Better Call Saul",
    "Marvel Anime: Wolverine",
    "Lion's Heart",
    "The Road to El Camino: Behind the Scenes of El Camino: A Breaking Bad Movie",
    "Peaky Blinders",
    "The Dark Knight",
    "The Matrix",
    "Interstellar",
    "Parasite",
];

/// Neighbors fetched per query
pub const TOP_N: usize = 5;

/// Mean similarity below which a match is considered poor
pub const FALLBACK_THRESHOLD: f32 = 0.1;

/// Titles sampled from [`POPULAR_MOVIES`] on a poor match
pub const FALLBACK_SAMPLE: usize = 5;

pub const LOW_CONFIDENCE_MESSAGE: &str =
    "We couldn\u{2019}t understand your search, but here are 5 recommendations!";

pub fn mean_similarity(matches: &[Match]) -> Option<f32> {
    if matches.is_empty() {
        return None;
    }
    Some(matches.iter().map(|m| m.similarity).sum::<f32>() / matches.len() as f32)
}

/// True when the matches should not be shown
///
/// Besides a low mean similarity, a result that is exactly the tail of the
/// catalog in order is rejected: that is what a query with no usable terms
/// returns from indexes that rank equidistant rows from the end.
pub fn is_poor_match(matches: &[Match], catalog: &[CatalogEntry]) -> bool {
    let Some(mean) = mean_similarity(matches) else {
        return true;
    };

    if mean < FALLBACK_THRESHOLD {
        return true;
    }

    if catalog.len() < matches.len() {
        return false;
    }

    let tail = &catalog[catalog.len() - matches.len()..];
    tail.iter()
        .zip(matches)
        .all(|(entry, m)| entry.title == m.title)
}

/// Draws distinct titles from [`POPULAR_MOVIES`]
pub fn sample_fallback<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    POPULAR_MOVIES
        .choose_multiple(rng, FALLBACK_SAMPLE)
        .map(|title| title.to_string())
        .collect()
}

/// Picks the titles to show for a query
pub fn select_titles<R: Rng + ?Sized>(model: &Model, query: &str, rng: &mut R) -> Selection {
    let normalized = preprocess_query(query);
    let matches = model.recommend(&normalized, TOP_N);
    let mean = mean_similarity(&matches).unwrap_or(0.0);

    if is_poor_match(&matches, model.catalog()) {
        tracing::info!(
            query = %query,
            mean_similarity = mean,
            "Poor match, falling back to popular titles"
        );

        return Selection {
            titles: sample_fallback(rng),
            fallback: true,
        };
    }

    tracing::info!(
        query = %query,
        mean_similarity = mean,
        best = %matches[0].title,
        "Query matched catalog"
    );

    Selection {
        titles: matches.into_iter().map(|m| m.title).collect(),
        fallback: false,
    }
}
