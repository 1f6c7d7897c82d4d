//! The single entry surface the request-handling layer calls.

use crate::geo::{GeoRadiusSearch, RadiusMatch};
use crate::recommend::{Recommendation, SimilarityRecommender};
use crate::valuation::ValuationEngine;
use propx_artifacts::{ArtifactStore, Availability};
use propx_core::{FieldOptions, PropertyRecord, Result};
use serde::Serialize;
use std::sync::Arc;

/// Price estimate in the external shape: point, bounds, and the
/// human-formatted range string.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Prediction {
    pub point: f64,
    pub low: f64,
    pub high: f64,
    pub formatted_range: String,
}

/// Inputs for the recommender pages: known locations and property ids.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommenderOptions {
    pub locations: Vec<String>,
    pub properties: Vec<String>,
}

/// Headline numbers over the property table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    pub total_properties: usize,
    pub sectors_covered: usize,
}

/// Dispatches one external request to exactly one engine and normalizes
/// every failure into the service error taxonomy.
pub struct QueryFacade {
    store: Arc<ArtifactStore>,
    valuation: ValuationEngine,
    recommender: SimilarityRecommender,
    geo: GeoRadiusSearch,
}

impl QueryFacade {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            valuation: ValuationEngine::new(store.clone()),
            recommender: SimilarityRecommender::new(store.clone()),
            geo: GeoRadiusSearch::new(store.clone()),
            store,
        }
    }

    /// Per-engine availability; there is no single global health flag.
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.store.availability()
    }

    pub fn predict(&self, record: &PropertyRecord) -> Result<Prediction> {
        let range = self.valuation.estimate(record)?;
        Ok(Prediction {
            point: range.point,
            low: range.low,
            high: range.high,
            formatted_range: range.formatted_range(),
        })
    }

    pub fn recommend(&self, property_id: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        self.recommender.recommend(property_id, top_n)
    }

    pub fn search_radius(&self, location: &str, radius_km: f64) -> Result<Vec<RadiusMatch>> {
        self.geo.search(location, radius_km)
    }

    /// Sorted distinct values per input field, for populating query forms.
    pub fn options(&self) -> Result<FieldOptions> {
        Ok(self.store.properties()?.options())
    }

    /// Known locations and property ids, sorted for display.
    pub fn recommender_options(&self) -> Result<RecommenderOptions> {
        let distances = self.store.distances()?;
        let mut locations = distances.locations().to_vec();
        locations.sort();
        let mut properties = distances.ids().to_vec();
        properties.sort();
        Ok(RecommenderOptions {
            locations,
            properties,
        })
    }

    pub fn stats(&self) -> Result<DatasetStats> {
        let properties = self.store.properties()?;
        Ok(DatasetStats {
            total_properties: properties.len(),
            sectors_covered: properties.sector_count(),
        })
    }
}
