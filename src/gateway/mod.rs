//! HTTP gateway (Axum): service info, health, and the analysis endpoint.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use std::any::Any;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{FailedAnalysis, GatewayError, panic_response};
pub use handler::analyze_handler;
pub use payload::{AnalyzeRequest, AnalyzeResponse, HealthResponse, RootResponse};
pub use state::AppState;

use crate::constants::{SERVICE_NAME, SERVICE_VERSION, STATUS_HEADER, STATUS_HEALTHY, STATUS_OK};

pub fn create_router_with_state(state: AppState) -> Router {
    let model_loaded = state.model_loaded();
    let gemini_ready = state.gemini_ready();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(panic, model_loaded, gemini_ready)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tracing::instrument(skip(state))]
pub async fn root_handler(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    (
        StatusCode::OK,
        headers,
        Json(RootResponse {
            message: SERVICE_NAME,
            status: "running",
            model_loaded: state.model_loaded(),
            gemini_ready: state.gemini_ready(),
            version: SERVICE_VERSION,
            started_at: state.started_at,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_HEALTHY));

    let body = HealthResponse::new(
        state.model_loaded(),
        state.availability(),
        state.analyzer.enrichment().headline_cache_entries(),
    );

    (StatusCode::OK, headers, Json(body)).into_response()
}
