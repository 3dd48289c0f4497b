use thiserror::Error;

/// Failure of an optional enrichment call. Never fatal to an analysis.
#[derive(Debug, Clone, Error)]
pub enum EnrichmentError {
    #[error("{service} unavailable: {reason}")]
    DependencyUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("{service} request timeout")]
    NetworkTimeout { service: &'static str },

    #[error("{service} network error - {reason}")]
    Network {
        service: &'static str,
        reason: String,
    },

    #[error("{service} returned HTTP {status}")]
    HttpStatus { service: &'static str, status: u16 },

    #[error("{service} returned a malformed response: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("{service} returned no content")]
    EmptyContent { service: &'static str },

    #[error("{service} rejected input: {reason}")]
    InvalidInput {
        service: &'static str,
        reason: String,
    },

    #[error("failed to build HTTP client: {reason}")]
    Client { reason: String },
}

impl EnrichmentError {
    /// Classifies a transport-level `reqwest` failure.
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EnrichmentError::NetworkTimeout { service }
        } else if err.is_decode() {
            EnrichmentError::MalformedResponse {
                service,
                reason: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            EnrichmentError::HttpStatus {
                service,
                status: status.as_u16(),
            }
        } else {
            EnrichmentError::Network {
                service,
                reason: err.to_string(),
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, EnrichmentError::NetworkTimeout { .. })
    }
}
