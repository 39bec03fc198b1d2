//! REST endpoints for landing page chrome.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::nav::{nav_items, submit_feedback};
use super::quotes::QuoteRotator;
use super::theme::Theme;

#[derive(Clone)]
pub struct SiteRouteState {
    pub quotes: QuoteRotator,
    pub started: Instant,
}

impl SiteRouteState {
    pub fn new(quotes: QuoteRotator) -> Self {
        Self {
            quotes,
            started: Instant::now(),
        }
    }
}

#[derive(Deserialize)]
struct ToggleThemeRequest {
    #[serde(default)]
    theme: Option<Theme>,
    #[serde(default)]
    prefers_dark: bool,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    #[serde(default)]
    text: String,
}

/// Build the site REST routes.
pub fn site_routes(state: SiteRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/site", get(site))
        .route("/api/theme/toggle", post(toggle_theme))
        .route("/api/feedback", post(feedback))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "ingredient-iq"
    }))
}

/// GET /api/site
async fn site(State(state): State<SiteRouteState>) -> impl IntoResponse {
    let quote = state.quotes.quote_at(state.started.elapsed());
    Json(serde_json::json!({
        "nav_items": nav_items(),
        "quote": quote,
    }))
}

/// POST /api/theme/toggle
async fn toggle_theme(Json(body): Json<ToggleThemeRequest>) -> impl IntoResponse {
    let current = Theme::resolve(body.theme, body.prefers_dark);
    Json(serde_json::json!({"theme": current.toggle()}))
}

/// POST /api/feedback
async fn feedback(Json(body): Json<FeedbackRequest>) -> Response {
    match submit_feedback(&body.text) {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(receipt)).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
