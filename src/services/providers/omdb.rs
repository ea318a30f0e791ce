/// OMDb (Open Movie Database) poster provider
///
/// Looks titles up by exact name: `GET /?t={title}&apikey={key}`. OMDb answers
/// 200 for unknown titles too, with `"Response": "False"` in the body.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::OmdbResponse,
    services::providers::PosterProvider,
};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn parse_response(title: &str, body: &str) -> AppResult<String> {
        let payload: OmdbResponse = serde_json::from_str(body)?;

        match payload.poster_url() {
            Some(url) => Ok(url.to_string()),
            None => {
                if let Some(error) = &payload.error {
                    tracing::debug!(title = %title, omdb_error = %error, "OMDb lookup failed");
                }
                Err(AppError::PosterNotFound(title.to_string()))
            }
        }
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn fetch_poster(&self, title: &str) -> AppResult<String> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
        }

        let url = format!("{}/", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let poster = Self::parse_response(title, &body)?;

        tracing::debug!(title = %title, poster = %poster, provider = "omdb", "Poster found");

        Ok(poster)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
