use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The engine a failed artifact degrades.
///
/// Availability is tracked per subsystem so that, for example, a missing
/// similarity matrix never takes valuation offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Valuation,
    Recommendation,
    LocationSearch,
    Catalog,
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Subsystem::Valuation => "valuation",
            Subsystem::Recommendation => "recommendation",
            Subsystem::LocationSearch => "location_search",
            Subsystem::Catalog => "catalog",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} subsystem unavailable")]
    ArtifactUnavailable(Subsystem),

    #[error("Property not found: {0}")]
    UnknownProperty(String),

    #[error("Location not found: {0}")]
    UnknownLocation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable kind, used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ArtifactUnavailable(_) => "artifact_unavailable",
            Error::UnknownProperty(_) => "unknown_property",
            Error::UnknownLocation(_) => "unknown_location",
            Error::InvalidParameter(_) => "invalid_parameter",
            Error::Prediction(_) => "prediction_failure",
            Error::Artifact(_) | Error::Io(_) => "internal",
        }
    }
}
