//! Radius-bounded search over the precomputed distance table.

use ordered_float::OrderedFloat;
use propx_artifacts::ArtifactStore;
use propx_core::{Error, Result};
use serde::Serialize;
use std::sync::Arc;

/// One property inside the search radius.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadiusMatch {
    pub property_id: String,
    pub distance_km: f64,
}

/// Filters the distance table by a reference location and radius.
pub struct GeoRadiusSearch {
    store: Arc<ArtifactStore>,
}

impl GeoRadiusSearch {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// Every property strictly closer than `radius_km` to `location`,
    /// sorted ascending by distance.
    ///
    /// Selection is strict (`<`) on the table's native meters, so a property
    /// at exactly the radius is excluded. Distances are reported in
    /// kilometers rounded to two decimal places. An empty result is a valid
    /// answer, not an error.
    pub fn search(&self, location: &str, radius_km: f64) -> Result<Vec<RadiusMatch>> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "radius must be positive, got {}",
                radius_km
            )));
        }

        let distances = self.store.distances()?;
        let column = distances
            .column_of(location)
            .ok_or_else(|| Error::UnknownLocation(location.to_string()))?;

        let threshold_m = radius_km * 1000.0;
        let mut matches: Vec<(usize, f64)> = distances
            .column_meters(column)
            .filter(|(_, meters)| *meters < threshold_m)
            .collect();
        matches.sort_by_key(|(_, meters)| OrderedFloat(*meters));

        let ids = distances.ids();
        Ok(matches
            .into_iter()
            .map(|(row, meters)| RadiusMatch {
                property_id: ids[row].clone(),
                distance_km: round_km(meters),
            })
            .collect())
    }
}

/// Meters to kilometers at the service's output precision.
fn round_km(meters: f64) -> f64 {
    (meters / 10.0).round() / 100.0
}
