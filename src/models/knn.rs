//! k-nearest-neighbor classifier over scaled feature vectors.

use crate::{
    domain::{FeatureVector, Label},
    utils::euclidean_distance,
};

#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    vectors: Vec<FeatureVector>,
    labels: Vec<Label>,
}

impl KnnClassifier {
    /// Stores the training set. Callers guarantee `vectors.len() >= k`.
    pub fn fit(k: usize, vectors: Vec<FeatureVector>, labels: Vec<Label>) -> Self {
        debug_assert_eq!(vectors.len(), labels.len());
        Self {
            k: k.max(1),
            vectors,
            labels,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Indices and distances of the `k` closest training rows, nearest first.
    /// Equal distances keep training order (stable sort).
    pub fn nearest(&self, query: &FeatureVector) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, euclidean_distance(query, v)))
            .collect();
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        distances.truncate(self.k);
        distances
    }

    /// Majority vote among the neighbors. A tie goes to `Up`.
    pub fn predict_one(&self, query: &FeatureVector) -> Label {
        let neighbors = self.nearest(query);
        let up_votes = neighbors
            .iter()
            .filter(|(i, _)| self.labels[*i].is_up())
            .count();
        (up_votes * 2 >= neighbors.len() && !neighbors.is_empty()).into()
    }

    pub fn predict(&self, queries: &[FeatureVector]) -> Vec<Label> {
        queries.iter().map(|q| self.predict_one(q)).collect()
    }
}
