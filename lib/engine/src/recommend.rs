//! Weighted multi-matrix similarity recommendation.

use ordered_float::OrderedFloat;
use propx_artifacts::{ArtifactStore, SimilaritySet};
use propx_core::{Error, Result, SimilarityMatrix};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::{Arc, OnceLock};

/// Fixed combination weights for the three similarity views
/// (location-based, price/size-based, amenity-based). Calibration constants
/// of the trained matrices, not user-configurable.
pub const SIM_WEIGHTS: [f32; 3] = [0.5, 0.8, 1.0];

/// One ranked candidate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub property_id: String,
    pub score: f32,
}

/// Ranks candidate properties by the weighted sum of the three similarity
/// matrices.
///
/// The combined matrix is computed lazily on first use and memoized for the
/// process lifetime; the backing artifacts never change, so the cache never
/// invalidates. Concurrent first callers may redundantly compute the same
/// immutable value; the first published copy wins.
pub struct SimilarityRecommender {
    store: Arc<ArtifactStore>,
    combined: OnceLock<Arc<SimilarityMatrix>>,
}

impl SimilarityRecommender {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            store,
            combined: OnceLock::new(),
        }
    }

    /// Top-N most similar properties, excluding the query property itself.
    ///
    /// Results are sorted by non-increasing score; ties keep the original
    /// row order (stable sort), so output is deterministic. Exactly
    /// `min(top_n, N - 1)` results are returned.
    pub fn recommend(&self, property_id: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        if top_n == 0 {
            return Err(Error::InvalidParameter(
                "top_n must be at least 1".to_string(),
            ));
        }

        let (distances, similarities) = self.store.recommendation()?;
        let row = distances
            .row_of(property_id)
            .ok_or_else(|| Error::UnknownProperty(property_id.to_string()))?;

        let combined = self.combined(&similarities)?;
        let scores = combined.row(row);

        let mut candidates: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(index, _)| *index != row)
            .collect();
        candidates.sort_by_key(|(_, score)| Reverse(OrderedFloat(*score)));
        candidates.truncate(top_n);

        let ids = distances.ids();
        Ok(candidates
            .into_iter()
            .map(|(index, score)| Recommendation {
                property_id: ids[index].clone(),
                score,
            })
            .collect())
    }

    fn combined(&self, similarities: &SimilaritySet) -> Result<Arc<SimilarityMatrix>> {
        if let Some(matrix) = self.combined.get() {
            return Ok(matrix.clone());
        }
        let [s1, s2, s3] = similarities.matrices();
        let matrix = SimilarityMatrix::weighted_sum(&[
            (s1, SIM_WEIGHTS[0]),
            (s2, SIM_WEIGHTS[1]),
            (s3, SIM_WEIGHTS[2]),
        ])?;
        Ok(self.combined.get_or_init(|| Arc::new(matrix)).clone())
    }
}
