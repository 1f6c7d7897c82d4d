//! # propX Engine
//!
//! The three query engines of the propX service and the facade that fronts
//! them:
//!
//! - [`ValuationEngine`] - price-range prediction through the trained pipeline
//! - [`SimilarityRecommender`] - weighted multi-matrix top-N recommendation
//! - [`GeoRadiusSearch`] - radius-bounded search over the distance table
//! - [`QueryFacade`] - the single entry surface the request layer calls
//!
//! Every engine holds a shared reference into the immutable
//! [`ArtifactStore`](propx_artifacts::ArtifactStore) and is a pure
//! in-memory computation: no I/O, no mutation, no internal retries.

pub mod facade;
pub mod geo;
pub mod recommend;
pub mod valuation;

pub use facade::{DatasetStats, Prediction, QueryFacade, RecommenderOptions};
pub use geo::{GeoRadiusSearch, RadiusMatch};
pub use recommend::{Recommendation, SimilarityRecommender, SIM_WEIGHTS};
pub use valuation::ValuationEngine;
