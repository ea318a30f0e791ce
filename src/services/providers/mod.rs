/// Poster metadata provider abstraction
///
/// A provider turns a catalog title into a poster image URL. Providers report
/// every failure as an error; callers decide how to degrade.
use crate::error::AppResult;

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for poster lookup backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetch the poster URL for a title
    ///
    /// Returns an error for transport failures, unexpected statuses, malformed
    /// payloads and titles without a poster.
    async fn fetch_poster(&self, title: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
