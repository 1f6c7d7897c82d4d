use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Property-to-location distance table, stored in meters.
///
/// Rows are property ids (the universe of recommendable properties), columns
/// are named reference locations. The row ordering is the shared ordering
/// every similarity matrix must follow.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    ids: Vec<String>,
    locations: Vec<String>,
    /// Row-major, `ids.len() * locations.len()` cells.
    meters: Vec<f64>,
    id_index: AHashMap<String, usize>,
    location_index: AHashMap<String, usize>,
}

/// Serialized form of [`DistanceTable`]; the lookup indexes are rebuilt on
/// load rather than persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceTableData {
    pub ids: Vec<String>,
    pub locations: Vec<String>,
    pub meters: Vec<f64>,
}

impl DistanceTable {
    pub fn new(ids: Vec<String>, locations: Vec<String>, meters: Vec<f64>) -> Result<Self> {
        if meters.len() != ids.len() * locations.len() {
            return Err(Error::Artifact(format!(
                "distance table shape mismatch: {} ids x {} locations needs {} cells, got {}",
                ids.len(),
                locations.len(),
                ids.len() * locations.len(),
                meters.len()
            )));
        }

        let mut id_index = AHashMap::with_capacity(ids.len());
        for (row, id) in ids.iter().enumerate() {
            if id_index.insert(id.clone(), row).is_some() {
                return Err(Error::Artifact(format!("duplicate property id '{}'", id)));
            }
        }

        let mut location_index = AHashMap::with_capacity(locations.len());
        for (col, location) in locations.iter().enumerate() {
            if location_index.insert(location.clone(), col).is_some() {
                return Err(Error::Artifact(format!(
                    "duplicate location '{}'",
                    location
                )));
            }
        }

        Ok(Self {
            ids,
            locations,
            meters,
            id_index,
            location_index,
        })
    }

    /// Number of properties (rows).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    #[inline]
    #[must_use]
    pub fn row_of(&self, property_id: &str) -> Option<usize> {
        self.id_index.get(property_id).copied()
    }

    #[inline]
    #[must_use]
    pub fn column_of(&self, location: &str) -> Option<usize> {
        self.location_index.get(location).copied()
    }

    /// Distances down one location column, in row order.
    pub fn column_meters(&self, col: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let width = self.locations.len();
        (0..self.ids.len()).map(move |row| (row, self.meters[row * width + col]))
    }
}

impl TryFrom<DistanceTableData> for DistanceTable {
    type Error = Error;

    fn try_from(data: DistanceTableData) -> Result<Self> {
        Self::new(data.ids, data.locations, data.meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DistanceTable {
        DistanceTable::new(
            vec!["P1".to_string(), "P2".to_string(), "P3".to_string()],
            vec!["Loc_A".to_string(), "Loc_B".to_string()],
            vec![500.0, 9000.0, 1500.0, 100.0, 2000.0, 4200.0],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let table = table();
        assert_eq!(table.row_of("P2"), Some(1));
        assert_eq!(table.row_of("P9"), None);
        assert_eq!(table.column_of("Loc_B"), Some(1));
        assert_eq!(table.column_of("Nowhere"), None);
    }

    #[test]
    fn test_column_meters_in_row_order() {
        let table = table();
        let col = table.column_of("Loc_A").unwrap();
        let values: Vec<_> = table.column_meters(col).collect();
        assert_eq!(values, vec![(0, 500.0), (1, 1500.0), (2, 2000.0)]);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let result = DistanceTable::new(
            vec!["P1".to_string()],
            vec!["Loc_A".to_string()],
            vec![500.0, 600.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = DistanceTable::new(
            vec!["P1".to_string(), "P1".to_string()],
            vec!["Loc_A".to_string()],
            vec![500.0, 600.0],
        );
        assert!(result.is_err());
    }
}
