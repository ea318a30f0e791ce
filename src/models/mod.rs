use serde::Deserialize;

pub mod title;

pub use title::{CatalogEntry, Match, MovieCard, Selection};

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from `GET /?t={title}&apikey={key}`
///
/// OMDb reports lookup failures in-band: a 200 status with `"Response": "False"`
/// and an `Error` message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbResponse {
    pub response: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Value OMDb uses for absent fields
pub const OMDB_NOT_AVAILABLE: &str = "N/A";

impl OmdbResponse {
    /// Returns the poster URL when the lookup succeeded and a poster exists
    pub fn poster_url(&self) -> Option<&str> {
        if self.response != "True" {
            return None;
        }

        self.poster
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != OMDB_NOT_AVAILABLE)
    }
}
