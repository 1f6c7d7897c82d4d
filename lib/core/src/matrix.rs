use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Square property-by-property similarity matrix, row-major.
///
/// Rows and columns follow the distance table's property ordering. A matrix
/// may carry its own id vector; when present it is checked against the
/// distance table at load time. Deserialization funnels through
/// [`SimilarityMatrix::new`] so a malformed blob cannot produce an invalid
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "SimilarityMatrixData")]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
    ids: Option<Vec<String>>,
}

/// Serialized form of [`SimilarityMatrix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrixData {
    pub n: usize,
    pub data: Vec<f32>,
    pub ids: Option<Vec<String>>,
}

impl TryFrom<SimilarityMatrixData> for SimilarityMatrix {
    type Error = Error;

    fn try_from(data: SimilarityMatrixData) -> Result<Self> {
        Self::new(data.n, data.data, data.ids)
    }
}

impl SimilarityMatrix {
    pub fn new(n: usize, data: Vec<f32>, ids: Option<Vec<String>>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::Artifact(format!(
                "similarity matrix shape mismatch: expected {} cells for n={}, got {}",
                n * n,
                n,
                data.len()
            )));
        }
        if let Some(ids) = &ids {
            if ids.len() != n {
                return Err(Error::Artifact(format!(
                    "similarity matrix carries {} ids for n={}",
                    ids.len(),
                    n
                )));
            }
        }
        Ok(Self { n, data, ids })
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    #[inline]
    #[must_use]
    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    /// Fixed linear combination of matrices of identical shape.
    ///
    /// The result carries no ids of its own; it inherits the shared ordering
    /// the inputs were validated against.
    pub fn weighted_sum(parts: &[(&SimilarityMatrix, f32)]) -> Result<Self> {
        let n = parts
            .first()
            .map(|(m, _)| m.size())
            .ok_or_else(|| Error::Artifact("no matrices to combine".to_string()))?;
        for (matrix, _) in parts {
            if matrix.size() != n {
                return Err(Error::Artifact(format!(
                    "cannot combine matrices of sizes {} and {}",
                    n,
                    matrix.size()
                )));
            }
        }

        let mut data = vec![0.0f32; n * n];
        for (matrix, weight) in parts {
            for (acc, value) in data.iter_mut().zip(&matrix.data) {
                *acc += weight * value;
            }
        }
        Self::new(n, data, None)
    }
}
