//! Similarity index: one embedding per profile, positionally aligned with the store.
//!
//! The index is all-or-nothing. A rebuild either yields a vector for every
//! profile, all of one dimension, or no index at all.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::ProfileStore;
use crate::provider::Embedder;

/// Added to the query norm and to the norm product.
pub const COSINE_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityIndex {
    vectors: Vec<Vec<f32>>,
    norms: Vec<f32>,
    dim: usize,
}

impl SimilarityIndex {
    /// Embed every projected profile in one batch.
    ///
    /// Returns `None` when the store is empty, the provider fails, or the
    /// response does not line up with the store.
    pub fn rebuild<E: Embedder + ?Sized>(embedder: &E, store: &ProfileStore) -> Option<Self> {
        if store.is_empty() {
            debug!("empty profile store; similarity index absent");
            return None;
        }
        let texts = store.projections();
        match embedder.embed(&texts) {
            Ok(vectors) => Self::from_vectors(vectors, store.len()),
            Err(err) => {
                warn!(error = %err, "embedding provider unavailable; similarity index absent");
                None
            }
        }
    }

    /// Accept `vectors` only if there are exactly `expected` of one non-zero dimension.
    pub fn from_vectors(vectors: Vec<Vec<f32>>, expected: usize) -> Option<Self> {
        if vectors.len() != expected || expected == 0 {
            warn!(
                expected,
                returned = vectors.len(),
                "embedding count mismatch; discarding index"
            );
            return None;
        }
        let dim = vectors[0].len();
        if dim == 0 || vectors.iter().any(|v| v.len() != dim) {
            warn!(dim, "inconsistent embedding dimensions; discarding index");
            return None;
        }
        let norms = vectors.iter().map(|v| l2_norm(v)).collect();
        debug!(profiles = expected, dim, "similarity index built");
        Some(Self {
            vectors,
            norms,
            dim,
        })
    }

    pub const fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity of `query` against every indexed vector, in index order.
    ///
    /// `None` when the query dimension does not match the index.
    pub fn similarities(&self, query: &[f32]) -> Option<Vec<f32>> {
        if query.len() != self.dim {
            warn!(
                query_dim = query.len(),
                index_dim = self.dim,
                "query embedding dimension mismatch"
            );
            return None;
        }
        let query_norm = l2_norm(query) + COSINE_EPSILON;
        let scores = self
            .vectors
            .par_iter()
            .zip(self.norms.par_iter())
            .map(|(vector, norm)| dot(vector, query) / (norm * query_norm + COSINE_EPSILON))
            .collect();
        Some(scores)
    }

    /// Embed `query` and score it. `None` means the caller must use keyword ranking.
    pub fn score<E: Embedder + ?Sized>(&self, embedder: &E, query: &str) -> Option<Vec<f32>> {
        match embedder.embed_one(query) {
            Ok(vector) => self.similarities(&vector),
            Err(err) => {
                warn!(error = %err, "query embedding failed; falling back to keywords");
                None
            }
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
