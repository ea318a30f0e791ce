use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Sparse row vector: parallel `indices` (ascending) and `values`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn new(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        let (indices, values) = entries.into_iter().unzip();
        Self { indices, values }
    }

    /// True when no stored value is non-zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Dot product of two vectors with ascending indices
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    pub(crate) fn validate(&self, dimension: usize) -> Result<(), String> {
        if self.indices.len() != self.values.len() {
            return Err(format!(
                "{} indices but {} values",
                self.indices.len(),
                self.values.len()
            ));
        }
        if let Some(out_of_range) = self.indices.iter().find(|i| **i >= dimension) {
            return Err(format!(
                "column {} out of range for dimension {}",
                out_of_range, dimension
            ));
        }
        if self.indices.windows(2).any(|w| w[0] >= w[1]) {
            return Err("indices are not strictly ascending".to_string());
        }
        if let Some(position) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(format!(
                "value at column {} is not finite",
                self.indices[position]
            ));
        }
        Ok(())
    }
}

/// Normalization applied to transformed vectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Longest n-gram a vectorizer may be configured for
pub const MAX_NGRAM: usize = 8;

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Tokens of two or more word characters
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// A fitted TF-IDF vectorizer
///
/// Fitting happens offline; this type only applies the learned vocabulary and
/// idf weights to new text.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    #[serde(default)]
    stop_words: HashSet<String>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> AppResult<Self> {
        let vectorizer = Self {
            vocabulary,
            idf,
            stop_words: HashSet::new(),
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: Norm::L2,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn with_stop_words<I, S>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = stop_words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> AppResult<Self> {
        self.ngram_range = (min_n, max_n);
        self.validate()?;
        Ok(self)
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Number of columns produced by `transform`
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(AppError::Model(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, column)) = self
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= self.idf.len())
        {
            return Err(AppError::Model(format!(
                "term '{}' maps to column {} outside {} columns",
                term,
                column,
                self.idf.len()
            )));
        }
        if let Some(column) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(AppError::Model(format!(
                "idf weight for column {} is not finite",
                column
            )));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n || max_n > MAX_NGRAM {
            return Err(AppError::Model(format!(
                "invalid ngram_range ({}, {}), expected 1 <= min <= max <= {}",
                min_n, max_n, MAX_NGRAM
            )));
        }
        Ok(())
    }

    /// Lowercases, splits into word tokens and drops stop words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        token_pattern()
            .find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();

        for n in min_n..=max_n {
            if n == 1 {
                grams.extend(tokens.iter().cloned());
            } else {
                grams.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }

        grams
    }

    /// Projects text into the fitted TF-IDF space
    ///
    /// Text with no in-vocabulary terms yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = self.tokenize(text);

        let mut counts: HashMap<usize, f32> = HashMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&column) = self.vocabulary.get(&gram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();

        if self.norm == Norm::L2 {
            let norm = entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (_, value) in entries.iter_mut() {
                    *value /= norm;
                }
            }
        }

        SparseVector::new(entries)
    }
}
