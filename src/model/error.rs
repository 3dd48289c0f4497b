use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at path: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {reason}")]
    InvalidArtifact { reason: String },

    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vectorization failed: {reason}")]
    VectorizationFailed { reason: String },

    #[error("malformed model output: {reason}")]
    MalformedOutput { reason: String },
}
