use crate::record::PropertyRecord;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The flat property feature table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTable {
    records: Vec<PropertyRecord>,
}

/// Sorted distinct values per input field, for populating query forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOptions {
    pub property_type: Vec<String>,
    pub sector: Vec<String>,
    pub bedrooms: Vec<f64>,
    pub bathroom: Vec<f64>,
    pub balcony: Vec<String>,
    pub property_age: Vec<String>,
    pub servant_room: Vec<f64>,
    pub store_room: Vec<f64>,
    pub furnishing_type: Vec<String>,
    pub luxury_category: Vec<String>,
    pub floor_category: Vec<String>,
}

impl PropertyTable {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    #[must_use]
    pub fn sector_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.sector.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Sorted distinct values of every input field.
    #[must_use]
    pub fn options(&self) -> FieldOptions {
        FieldOptions {
            property_type: distinct_strings(
                self.records.iter().map(|r| r.property_type.as_str()),
            ),
            sector: distinct_strings(self.records.iter().map(|r| r.sector.as_str())),
            bedrooms: distinct_numbers(self.records.iter().map(|r| r.bedrooms)),
            bathroom: distinct_numbers(self.records.iter().map(|r| r.bathrooms)),
            balcony: distinct_strings(self.records.iter().map(|r| r.balcony.as_str())),
            property_age: distinct_strings(self.records.iter().map(|r| r.property_age.as_str())),
            servant_room: distinct_numbers(self.records.iter().map(|r| r.servant_room)),
            store_room: distinct_numbers(self.records.iter().map(|r| r.store_room)),
            furnishing_type: distinct_strings(
                self.records.iter().map(|r| r.furnishing_type.as_str()),
            ),
            luxury_category: distinct_strings(
                self.records.iter().map(|r| r.luxury_category.as_str()),
            ),
            floor_category: distinct_strings(
                self.records.iter().map(|r| r.floor_category.as_str()),
            ),
        }
    }
}

fn distinct_strings<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn distinct_numbers(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by_key(|v| OrderedFloat(*v));
    out.dedup();
    out
}
