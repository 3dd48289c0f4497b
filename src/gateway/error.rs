use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use super::payload::AnalyzeResponse;
use crate::constants::{STATUS_ERROR, STATUS_HEADER, STATUS_INVALID_REQUEST};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No text content provided")]
    NoContent,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Request-shape problems are 400; everything else reports inside a 200.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NoContent | GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::OK,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            GatewayError::NoContent | GatewayError::InvalidRequest(_) => STATUS_INVALID_REQUEST,
            GatewayError::Internal(_) => STATUS_ERROR,
        }
    }

    /// Attaches the service flags and request id needed for the response body.
    pub fn into_failure(
        self,
        model_loaded: bool,
        gemini_ready: bool,
        request_id: impl Into<String>,
    ) -> FailedAnalysis {
        FailedAnalysis {
            error: self,
            model_loaded,
            gemini_ready,
            request_id: request_id.into(),
        }
    }
}

/// A [`GatewayError`] together with the context of the request it ended.
#[derive(Debug)]
pub struct FailedAnalysis {
    pub error: GatewayError,
    pub model_loaded: bool,
    pub gemini_ready: bool,
    pub request_id: String,
}

impl IntoResponse for FailedAnalysis {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            STATUS_HEADER,
            HeaderValue::from_static(self.error.status_label()),
        );

        let body = Json(AnalyzeResponse {
            success: false,
            result: Vec::new(),
            model_loaded: self.model_loaded,
            gemini_ready: self.gemini_ready,
            error: Some(self.error.to_string()),
            report: None,
            warnings: Vec::new(),
            request_id: self.request_id,
        });

        (status, headers, body).into_response()
    }
}

/// Turns a handler panic into the usual failure body (HTTP 200, `success = false`).
pub fn panic_response(
    panic: Box<dyn Any + Send + 'static>,
    model_loaded: bool,
    gemini_ready: bool,
) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(detail = %detail, "Request handler panicked");
    GatewayError::Internal(detail)
        .into_failure(model_loaded, gemini_ready, Uuid::new_v4().to_string())
        .into_response()
}
