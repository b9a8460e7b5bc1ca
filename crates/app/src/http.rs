//! HTTP surface over the dispenser.
//!
//! Routes mirror the dispenser operations one to one. Status mapping:
//! store failures are 500, an exhausted pool is 404, unknown ids and
//! malformed payloads are 400.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::error;

use quiz_core::model::{DispensedQuestion, QuestionId};
use services::{DispenseError, QuestionDispenser, QuizServices};

#[derive(Clone)]
struct AppState {
    dispenser: Arc<QuestionDispenser>,
}

/// Build the router with permissive CORS.
pub fn router(services: &QuizServices) -> Router {
    let state = AppState {
        dispenser: services.dispenser(),
    };

    Router::new()
        .route("/api/question", get(next_question))
        .route("/api/validate", post(validate))
        .route("/api/reset", post(reset))
        .route("/api/stats", get(stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<DispenseError> for ApiError {
    fn from(err: DispenseError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if matches!(err, DispenseError::Exhausted) {
            StatusCode::NOT_FOUND
        } else {
            error!(%err, "question store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ─── Handlers ──────────────────────────────────────────────────────────────────

async fn next_question(
    State(state): State<AppState>,
) -> Result<Json<DispensedQuestion>, ApiError> {
    Ok(Json(state.dispenser.next_question()?))
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    question_id: Option<Value>,
    answer: Option<Value>,
}

// Strings pass through; numbers are accepted in their JSON text form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct ValidateResponse {
    correct: bool,
}

// The body is parsed by hand so a missing or wrong content type is still accepted.
async fn validate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidateResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Missing JSON payload"));
    }
    let payload: ValidateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON payload: {e}")))?;

    let (Some(raw_id), Some(answer)) = (payload.question_id, payload.answer) else {
        return Err(ApiError::bad_request(
            "Both 'question_id' and 'answer' are required",
        ));
    };
    let id = scalar_text(raw_id)
        .map(QuestionId::from)
        .ok_or_else(|| ApiError::bad_request("Invalid question id"))?;
    let answer = scalar_text(answer).ok_or_else(|| ApiError::bad_request("Invalid answer"))?;

    let correct = state.dispenser.validate(&id, Some(&answer))?;
    Ok(Json(ValidateResponse { correct }))
}

async fn reset(State(state): State<AppState>) -> Json<Value> {
    state.dispenser.clear();
    Json(json!({ "message": "Cache cleared successfully" }))
}

async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let remaining = state.dispenser.remaining()?;
    Ok(Json(json!({
        "used": state.dispenser.used_count(),
        "remaining": remaining,
    })))
}
