//! REST endpoint for the ingredient analyzer.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use super::engine::Analyzer;
use super::model::AnalysisRequest;
use crate::error::AnalyzerError;

#[derive(Clone)]
pub struct AnalyzerRouteState {
    pub analyzer: Arc<Analyzer>,
}

/// Build the analyzer REST routes.
pub fn analyzer_routes(state: AnalyzerRouteState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .with_state(state)
}

/// POST /api/analyze
async fn analyze(
    State(state): State<AnalyzerRouteState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match state.analyzer.analyze(&request).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            let status = match e {
                AnalyzerError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
                AnalyzerError::UnsupportedInput { .. } => StatusCode::NOT_IMPLEMENTED,
            };
            (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
        }
    }
}
