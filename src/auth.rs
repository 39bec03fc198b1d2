//! Sign-in / sign-up flow.
//!
//! No accounts exist yet. Both actions wait out a simulated round trip and
//! tell the client where to go next: returning users to the analyzer, new
//! users to onboarding.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AuthError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    /// Only used on sign-up. Passwords are accepted on the wire and ignored.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub redirect: String,
}

pub struct AuthFlow {
    delay: Duration,
}

impl AuthFlow {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        let email = require_email(credentials)?;
        tokio::time::sleep(self.delay).await;
        info!(email = %email, "User signed in");
        Ok(AuthOutcome {
            redirect: "/analyzer".to_string(),
        })
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        let email = require_email(credentials)?;
        tokio::time::sleep(self.delay).await;
        info!(email = %email, name = ?credentials.name, "User signed up");
        Ok(AuthOutcome {
            redirect: "/onboarding".to_string(),
        })
    }
}

fn require_email(credentials: &Credentials) -> Result<&str, AuthError> {
    let email = credentials.email.trim();
    if email.is_empty() {
        Err(AuthError::MissingEmail)
    } else {
        Ok(email)
    }
}

// ── Routes ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AuthRouteState {
    pub flow: Arc<AuthFlow>,
}

/// Build the auth REST routes.
pub fn auth_routes(state: AuthRouteState) -> Router {
    Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signup", post(sign_up))
        .with_state(state)
}

async fn sign_in(State(state): State<AuthRouteState>, Json(body): Json<Credentials>) -> Response {
    outcome_response(state.flow.sign_in(&body).await)
}

async fn sign_up(State(state): State<AuthRouteState>, Json(body): Json<Credentials>) -> Response {
    outcome_response(state.flow.sign_up(&body).await)
}

fn outcome_response(result: Result<AuthOutcome, AuthError>) -> Response {
    match result {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
