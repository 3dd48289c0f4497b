use thiserror::Error;

use crate::model::ModelError;

/// Conditions that stop an analysis before a verdict is reached.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please enter news content.")]
    EmptyInput,

    #[error("Model not available. Check model files.")]
    ModelUnavailable,

    #[error("Text processing error: {0}")]
    Vectorization(#[source] ModelError),

    #[error("Prediction error: {0}")]
    Prediction(#[source] ModelError),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl AnalysisError {
    /// Marker prefixed to the first result line.
    pub fn marker(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "⚠️",
            _ => "❌",
        }
    }

    /// Six result lines: the message first, the rest empty.
    pub fn lines(&self) -> [String; 6] {
        [
            format!("{} {}", self.marker(), self),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]
    }

    /// Rejections caused by the request itself rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyInput | AnalysisError::InvalidParameter { .. }
        )
    }
}
