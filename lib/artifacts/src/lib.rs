//! # propX Artifacts
//!
//! The artifact store for the propX valuation and recommendation service.
//!
//! Five precomputed artifacts are exported offline and loaded here exactly
//! once at process start: the property feature table, the trained valuation
//! pipeline, the property-to-location distance table, and three
//! property-by-property similarity matrices. Each artifact loads
//! independently; a failed load degrades only the subsystem that depends on
//! it, never the whole process.

pub mod pipeline;
pub mod store;

pub use pipeline::{CategoryEncoder, LinearModel, ValuationPipeline};
pub use store::{
    ArtifactState, ArtifactStore, Availability, SimilaritySet, DISTANCES_FILE, PIPELINE_FILE,
    PROPERTIES_FILE, SIMILARITY_FILES,
};
