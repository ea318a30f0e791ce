use std::sync::Arc;

use crate::{recommender::Model, services::providers::PosterProvider};

/// Shared application state
///
/// Everything here is loaded at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<Model>,
    pub posters: Arc<dyn PosterProvider>,
}

impl AppState {
    pub fn new(model: Model, posters: Arc<dyn PosterProvider>) -> Self {
        Self {
            model: Arc::new(model),
            posters,
        }
    }
}
