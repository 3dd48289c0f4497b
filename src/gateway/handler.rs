use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::analysis::{AnalysisError, AnalysisWarning};
use crate::constants::{STATUS_HEADER, STATUS_OK, STATUS_REJECTED};
use crate::gateway::error::{FailedAnalysis, GatewayError};
use crate::gateway::payload::{AnalyzeRequest, AnalyzeResponse};
use crate::gateway::state::AppState;

#[instrument(skip(state, payload), fields(request_id = tracing::field::Empty))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, FailedAnalysis> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", tracing::field::display(&request_id));

    let fail = |error: GatewayError| {
        if error.status_code() == StatusCode::BAD_REQUEST {
            debug!(error = %error, "Analysis request rejected");
        } else {
            error!(error = %error, "Analysis request failed");
        }
        error.into_failure(state.model_loaded(), state.gemini_ready(), request_id.clone())
    };

    let Json(request) =
        payload.map_err(|e| fail(GatewayError::InvalidRequest(e.body_text())))?;

    let params = request.params();
    params
        .validate()
        .map_err(|e| fail(GatewayError::InvalidRequest(e.to_string())))?;

    let (text, url_warning) = resolve_text(&state, &request).await.map_err(&fail)?;

    let (response, status_label) = match state.analyzer.analyze(&text, &params).await {
        Ok(mut report) => {
            report.warnings.extend(url_warning);
            info!(label = %report.label, warnings = report.warnings.len(), "Analysis served");
            let response = AnalyzeResponse {
                success: true,
                result: report.lines().to_vec(),
                model_loaded: state.model_loaded(),
                gemini_ready: state.gemini_ready(),
                error: None,
                warnings: report.warnings.clone(),
                report: Some(report),
                request_id: request_id.clone(),
            };
            (response, STATUS_OK)
        }
        Err(e @ AnalysisError::InvalidParameter { .. }) => {
            return Err(fail(GatewayError::InvalidRequest(e.to_string())));
        }
        Err(e) => {
            debug!(reason = %e, "Analysis stopped early");
            let response = AnalyzeResponse {
                success: true,
                result: e.lines().to_vec(),
                model_loaded: state.model_loaded(),
                gemini_ready: state.gemini_ready(),
                error: None,
                report: None,
                warnings: url_warning.into_iter().collect(),
                request_id: request_id.clone(),
            };
            (response, STATUS_REJECTED)
        }
    };

    Ok(make_response(response, status_label))
}

/// Text to analyze: the request text, or the page behind `url` when the text is blank.
async fn resolve_text(
    state: &AppState,
    request: &AnalyzeRequest,
) -> Result<(String, Option<AnalysisWarning>), GatewayError> {
    if !request.text.trim().is_empty() {
        return Ok((request.text.clone(), None));
    }

    if request.url.trim().is_empty() {
        return Err(GatewayError::NoContent);
    }

    debug!(url = %request.url, "Extracting text from URL");
    Ok(state.analyzer.extract_url(request.url.trim()).await)
}

fn make_response(body: AnalyzeResponse, status_label: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(status_label));
    (StatusCode::OK, headers, Json(body)).into_response()
}
