use serde::{Deserialize, Serialize};

/// One row of the static catalog loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Display title, also used as the poster lookup key
    pub title: String,
    /// Text the index row was vectorized from (genres, cast, description)
    #[serde(default)]
    pub features: String,
}

/// A catalog title returned by the nearest-neighbor lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Match {
    pub title: String,
    /// `1 - distance`; 1.0 is an exact match
    pub similarity: f32,
}

/// Titles chosen for a single request
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub titles: Vec<String>,
    /// True when the titles were sampled from the fallback list
    pub fallback: bool,
}

/// A title paired with its resolved poster, ready to render
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub poster_url: String,
}

impl MovieCard {
    pub fn new(title: impl Into<String>, poster_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster_url: poster_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_features_default() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"title": "Click"}"#).unwrap();
        assert_eq!(entry.title, "Click");
        assert_eq!(entry.features, "");
    }

    #[test]
    fn test_movie_card_new() {
        let card = MovieCard::new("Parasite", "/static/content/default.png");
        assert_eq!(card.title, "Parasite");
        assert_eq!(card.poster_url, "/static/content/default.png");
    }
}
