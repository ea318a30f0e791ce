use serde::Deserialize;

use super::vectorizer::SparseVector;

/// Distance metric the index was built for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cosine,
    Euclidean,
}

/// A catalog row returned by a lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

/// Brute-force nearest-neighbor index over pre-vectorized catalog rows
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "IndexFile")]
pub struct NearestNeighbors {
    metric: Metric,
    rows: Vec<SparseVector>,
    norms: Vec<f32>,
}

/// On-disk layout of the index artifact
#[derive(Deserialize)]
pub struct IndexFile {
    #[serde(default)]
    pub metric: Metric,
    pub rows: Vec<SparseVector>,
}

impl From<IndexFile> for NearestNeighbors {
    fn from(file: IndexFile) -> Self {
        Self::new(file.metric, file.rows)
    }
}

impl NearestNeighbors {
    pub fn new(metric: Metric, rows: Vec<SparseVector>) -> Self {
        let norms = rows.iter().map(SparseVector::norm).collect();
        Self {
            metric,
            rows,
            norms,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    fn distance(&self, query: &SparseVector, query_norm: f32, row: usize) -> f32 {
        let row_norm = self.norms[row];
        let dot = query.dot(&self.rows[row]);

        match self.metric {
            Metric::Cosine => {
                if query_norm == 0.0 || row_norm == 0.0 {
                    1.0
                } else {
                    (1.0 - dot / (query_norm * row_norm)).clamp(0.0, 2.0)
                }
            }
            Metric::Euclidean => {
                (query_norm * query_norm + row_norm * row_norm - 2.0 * dot)
                    .max(0.0)
                    .sqrt()
            }
        }
    }

    /// Returns up to `k` rows ordered by ascending distance
    ///
    /// Equal distances keep catalog order.
    pub fn kneighbors(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        let query_norm = query.norm();

        let mut neighbors: Vec<Neighbor> = (0..self.rows.len())
            .map(|index| Neighbor {
                index,
                distance: self.distance(query, query_norm, index),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        neighbors.truncate(k);
        neighbors
    }
}
