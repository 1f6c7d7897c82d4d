//! The trained regression pipeline artifact.
//!
//! Exported offline as a self-contained blob: the ordered feature schema,
//! one category encoder per categorical column, and a linear model over the
//! encoded vector. The pipeline predicts in log-price space; the valuation
//! engine applies the inverse transform.

use ahash::AHashMap;
use propx_core::{ColumnKind, Error, FeatureSchema, PropertyRecord, Result};
use serde::{Deserialize, Serialize};

/// Learned encoding for one categorical column.
///
/// The vocabulary is exactly the set of categories seen at training time;
/// anything outside it is a hard prediction error, never a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEncoder {
    values: AHashMap<String, f64>,
}

impl CategoryEncoder {
    pub fn new(values: AHashMap<String, f64>) -> Self {
        Self { values }
    }

    #[inline]
    #[must_use]
    pub fn encode(&self, category: &str) -> Option<f64> {
        self.values.get(category).copied()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Linear model over the encoded feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

/// Opaque, immutable, callable valuation artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationPipeline {
    schema: FeatureSchema,
    encoders: AHashMap<String, CategoryEncoder>,
    model: LinearModel,
}

impl ValuationPipeline {
    /// Build a pipeline, validating its internal consistency once.
    pub fn new(
        schema: FeatureSchema,
        encoders: AHashMap<String, CategoryEncoder>,
        model: LinearModel,
    ) -> Result<Self> {
        let pipeline = Self {
            schema,
            encoders,
            model,
        };
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Consistency checks run at load time, not per prediction.
    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;

        if self.model.weights.len() != self.schema.len() {
            return Err(Error::Artifact(format!(
                "model has {} weights for {} feature columns",
                self.model.weights.len(),
                self.schema.len()
            )));
        }

        for spec in self.schema.categorical_columns() {
            match self.encoders.get(&spec.name) {
                Some(encoder) if !encoder.is_empty() => {}
                Some(_) => {
                    return Err(Error::Artifact(format!(
                        "encoder for column '{}' has an empty vocabulary",
                        spec.name
                    )));
                }
                None => {
                    return Err(Error::Artifact(format!(
                        "no encoder for categorical column '{}'",
                        spec.name
                    )));
                }
            }
        }

        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predict the log-price for one record.
    ///
    /// The feature vector is assembled in schema order from the record's
    /// named feature map. An unseen category or a malformed column surfaces
    /// as [`Error::Prediction`]; the input is deterministic, so the caller
    /// must not retry.
    pub fn predict(&self, record: &PropertyRecord) -> Result<f64> {
        let features = record.feature_map();
        let mut acc = self.model.intercept;

        for (spec, weight) in self.schema.columns.iter().zip(&self.model.weights) {
            let value = features.get(&spec.name).ok_or_else(|| {
                Error::Prediction(format!("missing feature column '{}'", spec.name))
            })?;

            let x = match spec.kind {
                ColumnKind::Numeric => value.as_f64().ok_or_else(|| {
                    Error::Prediction(format!("column '{}' is not numeric", spec.name))
                })?,
                ColumnKind::Categorical => {
                    let raw = value.as_str().ok_or_else(|| {
                        Error::Prediction(format!("column '{}' is not categorical", spec.name))
                    })?;
                    let encoder = self.encoders.get(&spec.name).ok_or_else(|| {
                        Error::Prediction(format!("no encoder for column '{}'", spec.name))
                    })?;
                    encoder.encode(raw).ok_or_else(|| {
                        Error::Prediction(format!(
                            "unseen category '{}' for column '{}'",
                            raw, spec.name
                        ))
                    })?
                }
            };

            acc += weight * x;
        }

        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propx_core::{ColumnSpec, PropertyType};

    fn encoder(pairs: &[(&str, f64)]) -> CategoryEncoder {
        CategoryEncoder::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    fn pipeline() -> ValuationPipeline {
        let schema = FeatureSchema::new(vec![
            ColumnSpec::categorical("property_type"),
            ColumnSpec::categorical("sector"),
            ColumnSpec::numeric("bedRoom"),
            ColumnSpec::numeric("built_up_area"),
        ]);
        let mut encoders = AHashMap::new();
        encoders.insert(
            "property_type".to_string(),
            encoder(&[("flat", 0.2), ("house", 0.8)]),
        );
        encoders.insert(
            "sector".to_string(),
            encoder(&[("sector 102", 1.1), ("sector 45", 0.7)]),
        );
        let model = LinearModel {
            intercept: 0.1,
            weights: vec![0.5, 0.3, 0.05, 0.0001],
        };
        ValuationPipeline::new(schema, encoders, model).unwrap()
    }

    fn record(sector: &str) -> PropertyRecord {
        PropertyRecord {
            property_type: PropertyType::House,
            sector: sector.to_string(),
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
    fn test_predict_is_deterministic() {
        let pipeline = pipeline();
        let a = pipeline.predict(&record("sector 102")).unwrap();
        let b = pipeline.predict(&record("sector 102")).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_predict_linear_combination() {
        let pipeline = pipeline();
        let y = pipeline.predict(&record("sector 102")).unwrap();
        let expected = 0.1 + 0.5 * 0.8 + 0.3 * 1.1 + 0.05 * 4.0 + 0.0001 * 2750.0;
        assert!((y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_category_rejected() {
        let pipeline = pipeline();
        let err = pipeline.predict(&record("sector 999")).unwrap_err();
        assert!(matches!(err, Error::Prediction(_)));
        assert!(err.to_string().contains("sector 999"));
    }

    #[test]
    fn test_weight_count_mismatch_rejected() {
        let schema = FeatureSchema::new(vec![ColumnSpec::numeric("bedRoom")]);
        let model = LinearModel {
            intercept: 0.0,
            weights: vec![0.1, 0.2],
        };
        let result = ValuationPipeline::new(schema, AHashMap::new(), model);
        assert!(matches!(result, Err(Error::Artifact(_))));
    }

    #[test]
    fn test_missing_encoder_rejected() {
        let schema = FeatureSchema::new(vec![ColumnSpec::categorical("sector")]);
        let model = LinearModel {
            intercept: 0.0,
            weights: vec![0.1],
        };
        let result = ValuationPipeline::new(schema, AHashMap::new(), model);
        assert!(matches!(result, Err(Error::Artifact(_))));
    }
}
