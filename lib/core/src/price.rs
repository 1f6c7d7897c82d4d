use serde::{Deserialize, Serialize};

/// Half-width of the price band around the point estimate, in crores.
/// Calibration constant of the trained model, not user-configurable.
pub const PRICE_BAND_HALF_WIDTH_CR: f64 = 0.22;

/// Smallest price the service will report; a price cannot be non-positive.
pub const MIN_PRICE_CR: f64 = 0.01;

/// A price estimate with its symmetric confidence band, in crores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub point: f64,
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    /// Build the band around a point estimate.
    ///
    /// Both the point and the low bound are clamped to [`MIN_PRICE_CR`] so
    /// that `0 < low <= point <= high` holds for every input.
    #[must_use]
    pub fn around(point_cr: f64) -> Self {
        let point = point_cr.max(MIN_PRICE_CR);
        let low = (point - PRICE_BAND_HALF_WIDTH_CR).max(MIN_PRICE_CR);
        let high = point + PRICE_BAND_HALF_WIDTH_CR;
        Self { point, low, high }
    }

    #[must_use]
    pub fn formatted_range(&self) -> String {
        format!("{} - {}", format_price(self.low), format_price(self.high))
    }
}

/// Human-readable price in crores.
#[must_use]
pub fn format_price(value_cr: f64) -> String {
    format!("₹ {:.2} Cr", value_cr)
}
