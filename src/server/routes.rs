//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use uuid::Uuid;

use super::AppState;
use crate::errors::AssistantError;
use crate::types::{Answer, QuestionRequest};

/// Answer a student question.
///
/// Ranking runs on the blocking pool. A worker that panics or is cancelled
/// surfaces as a 500; the advisory time budget surfaces as a 408. A body
/// that is not a valid question keeps the extractor's status code.
pub async fn answer_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_request(rejection),
    };

    match answer(&state, request).await {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn answer(state: &AppState, request: QuestionRequest) -> Result<Answer, AssistantError> {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("api_request", %request_id, has_image = request.image.is_some());

    let pipeline = Arc::clone(&state.pipeline);
    let joined = tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        pipeline.answer_question_since(&request.question, request.image.as_deref(), started)
    })
    .await;

    joined.map_err(|e| worker_failure(request_id, e))?
}

/// A blocking worker that panicked or was cancelled
pub(crate) fn worker_failure(request_id: Uuid, err: JoinError) -> AssistantError {
    tracing::error!(%request_id, error = %err, "question worker failed");

    let message = if err.is_panic() {
        let payload = err.into_panic();
        match payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
        {
            Some(msg) => format!("question worker panicked: {}", msg),
            None => "question worker panicked".to_string(),
        }
    } else {
        err.to_string()
    };

    AssistantError::Processing(message)
}

/// Body rejected by the JSON extractor, reported as `{"detail": ...}`
fn invalid_request(rejection: JsonRejection) -> Response {
    tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "rejected request body");
    let detail = serde_json::json!({ "detail": rejection.body_text() });
    (rejection.status(), Json(detail)).into_response()
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.is_timeout() {
            (StatusCode::REQUEST_TIMEOUT, "Request timeout".to_string())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
