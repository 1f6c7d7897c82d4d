//! # propX
//!
//! An artifact-backed real-estate valuation and recommendation service.
//!
//! propX loads five immutable precomputed artifacts at startup - a trained
//! regression pipeline, a property feature table, a property-to-location
//! distance table, and three similarity matrices - and answers three query
//! types against them: price-range prediction, weighted multi-matrix
//! similarity recommendation, and radius-bounded location search.
//!
//! Artifacts load independently; a missing or inconsistent artifact degrades
//! only the engine that depends on it, so valuation keeps working even when
//! the recommendation matrices are absent.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install propx
//! propx --data-dir ./data --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use propx::prelude::*;
//! use std::sync::Arc;
//!
//! // Load artifacts once at process start.
//! let store = Arc::new(ArtifactStore::load("./data"));
//! let facade = QueryFacade::new(store);
//!
//! // Recommend similar properties.
//! let similar = facade.recommend("M3M Crown", 5).unwrap();
//!
//! // Search within a radius of a known location.
//! let nearby = facade.search_radius("Sector 54 Chowk Metro Station", 2.0).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - [`propx-core`](https://docs.rs/propx-core) - Domain types and the error taxonomy
//! - [`propx-artifacts`](https://docs.rs/propx-artifacts) - Load-once artifact store with per-subsystem degradation
//! - [`propx-engine`](https://docs.rs/propx-engine) - Valuation, recommendation, and radius-search engines
//! - [`propx-api`](https://docs.rs/propx-api) - REST API

// Re-export core types
pub use propx_core::{
    ColumnKind, ColumnSpec, DistanceTable, DistanceTableData, Error, FeatureSchema, FieldOptions,
    PriceRange, PropertyRecord, PropertyTable, PropertyType, Result, SimilarityMatrix,
    SimilarityMatrixData, Subsystem,
};

// Re-export the artifact store
pub use propx_artifacts::{
    ArtifactStore, Availability, CategoryEncoder, LinearModel, ValuationPipeline,
};

// Re-export engines
pub use propx_engine::{
    DatasetStats, GeoRadiusSearch, Prediction, QueryFacade, RadiusMatch, Recommendation,
    RecommenderOptions, SimilarityRecommender, ValuationEngine,
};

// Re-export API
pub use propx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ArtifactStore, Availability, DistanceTable, Error, FeatureSchema, GeoRadiusSearch,
        PriceRange, PropertyRecord, PropertyTable, PropertyType, QueryFacade, Result,
        SimilarityMatrix, SimilarityRecommender, Subsystem, ValuationEngine, ValuationPipeline,
    };
}
