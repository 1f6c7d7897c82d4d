use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Property kind present in the dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Flat,
    House,
}

impl PropertyType {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "flat",
            PropertyType::House => "house",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the property feature table.
///
/// The serde rename attributes are the training-time column names of the
/// regression pipeline. Serializing a record yields exactly the named
/// feature map the pipeline was fit on, so the column contract lives in one
/// place instead of being re-typed at every call site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    pub property_type: PropertyType,
    pub sector: String,
    #[serde(rename = "bedRoom")]
    pub bedrooms: f64,
    #[serde(rename = "bathroom")]
    pub bathrooms: f64,
    /// Categorical, the top bucket is "3+".
    pub balcony: String,
    #[serde(rename = "agePossession")]
    pub property_age: String,
    pub built_up_area: f64,
    /// 0/1 flag stored as numeric, matching the trained schema.
    #[serde(rename = "servant room")]
    pub servant_room: f64,
    #[serde(rename = "store room")]
    pub store_room: f64,
    pub furnishing_type: String,
    pub luxury_category: String,
    pub floor_category: String,
}

impl PropertyRecord {
    /// Validate the record before any artifact is touched.
    ///
    /// Categorical fields must be non-empty and numeric fields finite and
    /// non-negative. Vocabulary membership is not checked here; the pipeline
    /// rejects unseen categories itself.
    pub fn validate(&self) -> Result<()> {
        let categoricals = [
            ("sector", &self.sector),
            ("balcony", &self.balcony),
            ("agePossession", &self.property_age),
            ("furnishing_type", &self.furnishing_type),
            ("luxury_category", &self.luxury_category),
            ("floor_category", &self.floor_category),
        ];
        for (name, value) in categoricals {
            if value.trim().is_empty() {
                return Err(Error::InvalidParameter(format!(
                    "field '{}' must not be empty",
                    name
                )));
            }
        }

        let numerics = [
            ("bedRoom", self.bedrooms),
            ("bathroom", self.bathrooms),
            ("built_up_area", self.built_up_area),
            ("servant room", self.servant_room),
            ("store room", self.store_room),
        ];
        for (name, value) in numerics {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "field '{}' must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// The record as a named feature map in training-column terms.
    pub fn feature_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyRecord {
        PropertyRecord {
            property_type: PropertyType::House,
            sector: "sector 102".to_string(),
            bedrooms: 4.0,
            bathrooms: 3.0,
            balcony: "3+".to_string(),
            property_age: "New Property".to_string(),
            built_up_area: 2750.0,
            servant_room: 0.0,
            store_room: 0.0,
            furnishing_type: "unfurnished".to_string(),
            luxury_category: "Low".to_string(),
            floor_category: "Low Floor".to_string(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_categorical_rejected() {
        let mut record = sample();
        record.sector = "  ".to_string();
        assert!(matches!(
            record.validate(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_non_finite_numeric_rejected() {
        let mut record = sample();
        record.built_up_area = f64::NAN;
        assert!(matches!(
            record.validate(),
            Err(Error::InvalidParameter(_))
        ));

        let mut record = sample();
        record.bedrooms = -1.0;
        assert!(matches!(
            record.validate(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_feature_map_uses_training_columns() {
        let map = sample().feature_map();
        assert_eq!(map.get("property_type").and_then(|v| v.as_str()), Some("house"));
        assert_eq!(map.get("bedRoom").and_then(|v| v.as_f64()), Some(4.0));
        assert_eq!(map.get("agePossession").and_then(|v| v.as_str()), Some("New Property"));
        assert_eq!(map.get("servant room").and_then(|v| v.as_f64()), Some(0.0));
        assert!(!map.contains_key("bedrooms"));
    }
}
