//! # propX Core
//!
//! Core library for the propX valuation and recommendation service.
//!
//! This crate provides the domain types shared by every other crate:
//!
//! - [`PropertyRecord`] - One row of the property feature table
//! - [`FeatureSchema`] - Ordered column contract of the trained pipeline
//! - [`PriceRange`] - Point estimate with its fixed-width band
//! - [`DistanceTable`] - Property-to-location distances in meters
//! - [`SimilarityMatrix`] - Square pairwise similarity scores
//! - [`PropertyTable`] - The flat feature table backing option listings
//! - [`Error`] - The service-wide error taxonomy
//!
//! All of these are immutable once an artifact store has loaded them;
//! nothing in this crate mutates shared state after construction.

pub mod distance;
pub mod error;
pub mod matrix;
pub mod price;
pub mod record;
pub mod schema;
pub mod table;

pub use distance::{DistanceTable, DistanceTableData};
pub use error::{Error, Result, Subsystem};
pub use matrix::{SimilarityMatrix, SimilarityMatrixData};
pub use price::{format_price, PriceRange, MIN_PRICE_CR, PRICE_BAND_HALF_WIDTH_CR};
pub use record::{PropertyRecord, PropertyType};
pub use schema::{ColumnKind, ColumnSpec, FeatureSchema};
pub use table::{FieldOptions, PropertyTable};
