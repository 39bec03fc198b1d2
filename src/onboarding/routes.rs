//! REST endpoints driving an onboarding wizard.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answers::AnswerValue;
use super::catalog::{Question, QuestionKind};
use super::sessions::WizardSessions;
use super::wizard::{StepOutcome, WizardState};
use crate::error::WizardError;

/// Where the user lands after finishing onboarding.
pub const COMPLETION_REDIRECT: &str = "/analyzer";

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub sessions: Arc<WizardSessions>,
}

/// What the client needs to render the current step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardView {
    pub id: Uuid,
    pub cursor: usize,
    pub count: usize,
    pub progress: u8,
    pub is_last: bool,
    pub can_go_back: bool,
    pub question: Question,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
    /// Committed custom items for the current question.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_items: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub draft: String,
}

impl WizardView {
    pub fn of(wizard: &WizardState) -> Self {
        let question = wizard.current_question().clone();
        let (custom_items, draft) = if question.kind == QuestionKind::MultiChoice {
            (
                wizard.custom_items().items(&question.id).to_vec(),
                wizard.custom_items().draft(&question.id).to_string(),
            )
        } else {
            (Vec::new(), String::new())
        };
        Self {
            id: wizard.id(),
            cursor: wizard.cursor(),
            count: wizard.question_count(),
            progress: wizard.progress_percent(),
            is_last: wizard.is_last(),
            can_go_back: wizard.can_go_back(),
            answer: wizard.get_answer(&question.id).cloned(),
            question,
            custom_items,
            draft,
        }
    }
}

#[derive(Deserialize)]
struct ToggleRequest {
    option: String,
}

#[derive(Deserialize)]
struct DraftRequest {
    text: String,
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding", post(start))
        .route("/api/onboarding/{id}", get(view))
        .route("/api/onboarding/{id}/answers/{question_id}", put(set_answer))
        .route(
            "/api/onboarding/{id}/answers/{question_id}/toggle",
            post(toggle_option),
        )
        .route("/api/onboarding/{id}/custom/{category}/draft", put(stage_custom))
        .route("/api/onboarding/{id}/custom/{category}/commit", post(commit_custom))
        .route(
            "/api/onboarding/{id}/custom/{category}/{index}",
            delete(remove_custom),
        )
        .route("/api/onboarding/{id}/next", post(next))
        .route("/api/onboarding/{id}/previous", post(previous))
        .route("/api/onboarding/{id}/skip", post(skip))
        .with_state(state)
}

// ── Handlers ────────────────────────────────────────────────────────────

/// POST /api/onboarding
async fn start(State(state): State<OnboardingRouteState>) -> Response {
    let id = state.sessions.start().await;
    match state.sessions.with(id, WizardView::of).await {
        Some(view) => (StatusCode::CREATED, Json(view)).into_response(),
        None => not_found(),
    }
}

/// GET /api/onboarding/{id}
async fn view(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return bad_id();
    };
    match state.sessions.with(id, WizardView::of).await {
        Some(view) => Json(view).into_response(),
        None => not_found(),
    }
}

async fn set_answer(
    State(state): State<OnboardingRouteState>,
    Path((id, question_id)): Path<(String, String)>,
    Json(value): Json<AnswerValue>,
) -> Response {
    mutate(&state, &id, move |w| w.set_answer(&question_id, value)).await
}

async fn toggle_option(
    State(state): State<OnboardingRouteState>,
    Path((id, question_id)): Path<(String, String)>,
    Json(body): Json<ToggleRequest>,
) -> Response {
    mutate(&state, &id, move |w| w.toggle_option(&question_id, &body.option)).await
}

async fn stage_custom(
    State(state): State<OnboardingRouteState>,
    Path((id, category)): Path<(String, String)>,
    Json(body): Json<DraftRequest>,
) -> Response {
    mutate(&state, &id, move |w| w.stage_custom(&category, body.text)).await
}

async fn commit_custom(
    State(state): State<OnboardingRouteState>,
    Path((id, category)): Path<(String, String)>,
) -> Response {
    mutate(&state, &id, move |w| w.commit_custom(&category).map(|_| ())).await
}

async fn remove_custom(
    State(state): State<OnboardingRouteState>,
    Path((id, category, index)): Path<(String, String, String)>,
) -> Response {
    let Ok(index) = index.parse::<usize>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid custom item index"})),
        )
            .into_response();
    };
    mutate(&state, &id, move |w| w.remove_custom(&category, index).map(|_| ())).await
}

async fn next(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    step(&state, &id, WizardState::next).await
}

async fn skip(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    step(&state, &id, WizardState::skip).await
}

async fn previous(State(state): State<OnboardingRouteState>, Path(id): Path<String>) -> Response {
    mutate(&state, &id, |w| w.previous().map(|_| ())).await
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Apply `f` and answer with the updated view.
async fn mutate<F>(state: &OnboardingRouteState, id: &str, f: F) -> Response
where
    F: FnOnce(&mut WizardState) -> Result<(), WizardError> + Send,
{
    let Some(id) = parse_id(id) else {
        return bad_id();
    };
    let result = state
        .sessions
        .with_mut(id, |w| f(w).map(|()| WizardView::of(w)))
        .await;
    match result {
        Some(Ok(view)) => Json(view).into_response(),
        Some(Err(e)) => wizard_error(e),
        None => not_found(),
    }
}

/// Move forward; answers with the new view or the completion redirect.
async fn step<F>(state: &OnboardingRouteState, id: &str, f: F) -> Response
where
    F: FnOnce(&mut WizardState) -> Result<StepOutcome, WizardError> + Send,
{
    let Some(id) = parse_id(id) else {
        return bad_id();
    };
    let result = state
        .sessions
        .with_mut(id, |w| {
            f(w).map(|outcome| match outcome {
                StepOutcome::Advanced(_) => Some(WizardView::of(w)),
                StepOutcome::Completed => None,
            })
        })
        .await;
    match result {
        Some(Ok(Some(view))) => Json(view).into_response(),
        Some(Ok(None)) => Json(serde_json::json!({
            "status": "completed",
            "redirect": COMPLETION_REDIRECT,
        }))
        .into_response(),
        Some(Err(e)) => wizard_error(e),
        None => not_found(),
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn bad_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "Invalid wizard ID"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Wizard not found"})),
    )
        .into_response()
}

fn wizard_error(e: WizardError) -> Response {
    let status = match e {
        WizardError::UnknownQuestion { .. } => StatusCode::NOT_FOUND,
        WizardError::Completed => StatusCode::CONFLICT,
        WizardError::NotACustomCategory { .. }
        | WizardError::Answer(_)
        | WizardError::CustomItem(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
}
