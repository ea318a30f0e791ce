use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::neighbors::NearestNeighbors;
use super::vectorizer::TfidfVectorizer;
use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, Match},
};

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const INDEX_FILE: &str = "index.json";
pub const CATALOG_FILE: &str = "catalog.json";

/// The pre-trained matcher: vectorizer, neighbor index and the catalog rows
/// the index was built from. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Model {
    vectorizer: TfidfVectorizer,
    index: NearestNeighbors,
    catalog: Vec<CatalogEntry>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| AppError::Model(format!("failed to parse {}: {}", path.display(), e)))
}

impl Model {
    /// Loads and validates the three artifacts from `dir`
    pub fn load(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();

        let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
        let index: NearestNeighbors = read_json(&dir.join(INDEX_FILE))?;
        let catalog: Vec<CatalogEntry> = read_json(&dir.join(CATALOG_FILE))?;

        let model = Self::from_parts(vectorizer, index, catalog)?;

        tracing::info!(
            model_dir = %dir.display(),
            titles = model.catalog.len(),
            vocabulary = model.vectorizer.dimension(),
            metric = ?model.index.metric(),
            "Loaded recommendation model"
        );

        Ok(model)
    }

    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        index: NearestNeighbors,
        catalog: Vec<CatalogEntry>,
    ) -> AppResult<Self> {
        vectorizer.validate()?;

        if catalog.is_empty() {
            return Err(AppError::Model(format!("{} is empty", CATALOG_FILE)));
        }

        if index.len() != catalog.len() {
            return Err(AppError::Model(format!(
                "{} has {} rows but {} has {} titles",
                INDEX_FILE,
                index.len(),
                CATALOG_FILE,
                catalog.len()
            )));
        }

        for (row, vector) in index.rows().iter().enumerate() {
            vector
                .validate(vectorizer.dimension())
                .map_err(|e| AppError::Model(format!("{} row {}: {}", INDEX_FILE, row, e)))?;
        }

        Ok(Self {
            vectorizer,
            index,
            catalog,
        })
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Nearest `top_n` catalog titles for `query`, best first
    pub fn recommend(&self, query: &str, top_n: usize) -> Vec<Match> {
        let vector = self.vectorizer.transform(query);

        self.index
            .kneighbors(&vector, top_n)
            .into_iter()
            .map(|neighbor| Match {
                title: self.catalog[neighbor.index].title.clone(),
                similarity: 1.0 - neighbor.distance,
            })
            .collect()
    }
}
