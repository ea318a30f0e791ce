//! Text similarity matching over the static catalog.
//!
//! The vectorizer and the neighbor index are fitted offline and shipped as
//! JSON artifacts; this module only loads and applies them.

pub mod model;
pub mod neighbors;
pub mod vectorizer;

pub use model::Model;
pub use neighbors::{Metric, NearestNeighbors, Neighbor};
pub use vectorizer::{Norm, SparseVector, TfidfVectorizer};

/// Lowercases and strips everything except ASCII letters, digits and whitespace
pub fn preprocess_query(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}
