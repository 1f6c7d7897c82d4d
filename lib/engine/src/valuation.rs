//! Price-range estimation through the trained regression pipeline.

use propx_artifacts::ArtifactStore;
use propx_core::{PriceRange, PropertyRecord, Result};
use std::sync::Arc;

/// Runs the valuation pipeline and derives the fixed-width price band.
pub struct ValuationEngine {
    store: Arc<ArtifactStore>,
}

impl ValuationEngine {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// Estimate the price range for one property.
    ///
    /// The record is validated before any artifact is touched; the pipeline
    /// predicts in log-price space and the inverse transform (`exp(x) - 1`)
    /// recovers the price in crores. Pure: identical input yields identical
    /// output.
    pub fn estimate(&self, record: &PropertyRecord) -> Result<PriceRange> {
        record.validate()?;
        let pipeline = self.store.pipeline()?;
        let log_price = pipeline.predict(record)?;
        Ok(PriceRange::around(log_price.exp_m1()))
    }
}
