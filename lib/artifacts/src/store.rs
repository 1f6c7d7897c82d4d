//! Load-once artifact store.
//!
//! Every artifact is deserialized independently during [`ArtifactStore::load`];
//! a failure is logged and the slot becomes an explicit
//! [`ArtifactState::Unavailable`], so downstream engines can tell "no data"
//! apart from an empty result. After `load` returns the store is immutable
//! and all accessors are lock-free reads.

use crate::pipeline::ValuationPipeline;
use propx_core::{
    DistanceTable, DistanceTableData, Error, PropertyTable, Result, SimilarityMatrix, Subsystem,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const PROPERTIES_FILE: &str = "properties.bin";
pub const PIPELINE_FILE: &str = "pipeline.bin";
pub const DISTANCES_FILE: &str = "location_distance.bin";
pub const SIMILARITY_FILES: [&str; 3] = ["cosine_sim1.bin", "cosine_sim2.bin", "cosine_sim3.bin"];

/// One artifact slot: loaded, or explicitly unavailable.
///
/// Unavailable is a sentinel, never a best-guess synthetic value.
#[derive(Debug, Clone)]
pub enum ArtifactState<T> {
    Loaded(Arc<T>),
    Unavailable,
}

impl<T> ArtifactState<T> {
    fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => ArtifactState::Loaded(Arc::new(v)),
            None => ArtifactState::Unavailable,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactState::Loaded(_))
    }

    /// The loaded value, or the per-subsystem unavailability error.
    pub fn get(&self, subsystem: Subsystem) -> Result<Arc<T>> {
        match self {
            ArtifactState::Loaded(value) => Ok(value.clone()),
            ArtifactState::Unavailable => Err(Error::ArtifactUnavailable(subsystem)),
        }
    }
}

/// The three similarity matrices, validated against the distance table's
/// property ordering before this type is ever constructed.
#[derive(Debug, Clone)]
pub struct SimilaritySet {
    matrices: [SimilarityMatrix; 3],
}

impl SimilaritySet {
    #[inline]
    #[must_use]
    pub fn matrices(&self) -> &[SimilarityMatrix; 3] {
        &self.matrices
    }
}

/// Per-engine availability, reported instead of a single global health flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub valuation: bool,
    pub recommendation: bool,
    pub location_search: bool,
    pub catalog: bool,
}

/// Owns the five artifacts for the process lifetime.
pub struct ArtifactStore {
    properties: ArtifactState<PropertyTable>,
    pipeline: ArtifactState<ValuationPipeline>,
    distances: ArtifactState<DistanceTable>,
    similarities: ArtifactState<SimilaritySet>,
}

impl ArtifactStore {
    /// Load every artifact from `data_dir`.
    ///
    /// Never fails as a whole: each artifact that cannot be read, decoded,
    /// or validated is logged and left unavailable, degrading only the
    /// engines that depend on it.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();

        let properties = load_artifact::<PropertyTable>(dir, PROPERTIES_FILE);

        let pipeline = load_artifact::<ValuationPipeline>(dir, PIPELINE_FILE).and_then(|p| {
            match p.validate() {
                Ok(()) => Some(p),
                Err(e) => {
                    warn!("Pipeline artifact failed validation: {}", e);
                    None
                }
            }
        });

        let distances = load_artifact::<DistanceTableData>(dir, DISTANCES_FILE).and_then(|data| {
            match DistanceTable::try_from(data) {
                Ok(table) => Some(table),
                Err(e) => {
                    warn!("Distance table failed validation: {}", e);
                    None
                }
            }
        });

        let [f1, f2, f3] = SIMILARITY_FILES;
        let similarities = match (
            load_artifact::<SimilarityMatrix>(dir, f1),
            load_artifact::<SimilarityMatrix>(dir, f2),
            load_artifact::<SimilarityMatrix>(dir, f3),
        ) {
            (Some(s1), Some(s2), Some(s3)) => Some([s1, s2, s3]),
            _ => None,
        };

        Self::from_parts(properties, pipeline, distances, similarities)
    }

    /// Assemble a store from already-deserialized artifacts.
    ///
    /// This is where cross-artifact consistency is enforced: the similarity
    /// matrices are only accepted when the distance table is present and
    /// every matrix matches its property ordering. On mismatch the whole
    /// recommendation subsystem is marked unavailable (fail closed) rather
    /// than returning misleading rankings later.
    pub fn from_parts(
        properties: Option<PropertyTable>,
        pipeline: Option<ValuationPipeline>,
        distances: Option<DistanceTable>,
        similarities: Option<[SimilarityMatrix; 3]>,
    ) -> Self {
        let similarities = match similarities {
            None => ArtifactState::Unavailable,
            Some(matrices) => match &distances {
                None => {
                    warn!(
                        "Similarity matrices loaded but the distance table is unavailable; \
                         recommendation disabled"
                    );
                    ArtifactState::Unavailable
                }
                Some(table) => match validate_similarity_consistency(table, &matrices) {
                    Ok(()) => ArtifactState::Loaded(Arc::new(SimilaritySet { matrices })),
                    Err(e) => {
                        warn!("Similarity consistency check failed: {}; recommendation disabled", e);
                        ArtifactState::Unavailable
                    }
                },
            },
        };

        Self {
            properties: ArtifactState::from_option(properties),
            pipeline: ArtifactState::from_option(pipeline),
            distances: ArtifactState::from_option(distances),
            similarities,
        }
    }

    /// The property feature table, backing option listings and stats.
    pub fn properties(&self) -> Result<Arc<PropertyTable>> {
        self.properties.get(Subsystem::Catalog)
    }

    /// The trained valuation pipeline.
    pub fn pipeline(&self) -> Result<Arc<ValuationPipeline>> {
        self.pipeline.get(Subsystem::Valuation)
    }

    /// The distance table, backing radius search.
    pub fn distances(&self) -> Result<Arc<DistanceTable>> {
        self.distances.get(Subsystem::LocationSearch)
    }

    /// Everything recommendation needs: the shared property ordering and the
    /// validated similarity matrices.
    pub fn recommendation(&self) -> Result<(Arc<DistanceTable>, Arc<SimilaritySet>)> {
        let similarities = self.similarities.get(Subsystem::Recommendation)?;
        let distances = self.distances.get(Subsystem::Recommendation)?;
        Ok((distances, similarities))
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        Availability {
            valuation: self.pipeline.is_loaded(),
            recommendation: self.similarities.is_loaded() && self.distances.is_loaded(),
            location_search: self.distances.is_loaded(),
            catalog: self.properties.is_loaded(),
        }
    }
}

/// Assert the shared-ordering invariant between the distance table and every
/// similarity matrix: same property count, and where a matrix carries its
/// own ids, the exact same ids in the exact same order.
pub fn validate_similarity_consistency(
    distances: &DistanceTable,
    matrices: &[SimilarityMatrix; 3],
) -> Result<()> {
    let n = distances.len();
    for (index, matrix) in matrices.iter().enumerate() {
        if matrix.size() != n {
            return Err(Error::Artifact(format!(
                "similarity matrix {} covers {} properties, distance table has {}",
                index + 1,
                matrix.size(),
                n
            )));
        }
        if let Some(ids) = matrix.ids() {
            if ids != distances.ids() {
                return Err(Error::Artifact(format!(
                    "similarity matrix {} property ordering differs from the distance table",
                    index + 1
                )));
            }
        }
    }
    Ok(())
}

fn load_artifact<T: DeserializeOwned>(dir: &Path, file: &str) -> Option<T> {
    match read_blob(dir, file) {
        Ok(value) => {
            info!("Loaded artifact {}", file);
            Some(value)
        }
        Err(e) => {
            warn!("Artifact {} unavailable: {}", file, e);
            None
        }
    }
}

fn read_blob<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let bytes = std::fs::read(dir.join(file))?;
    bincode::deserialize(&bytes).map_err(|e| Error::Artifact(format!("failed to decode {}: {}", file, e)))
}
