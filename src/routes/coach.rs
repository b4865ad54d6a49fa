use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::services::coach::{ChatMessage, CoachError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/completion", post(completion))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    task_title: String,
    #[serde(default)]
    dialogues: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct CompletionResponse {
    message: String,
}

async fn completion(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CompletionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.task_title.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_TASK", "taskTitle is required"));
    }

    let message = state
        .coach()
        .complete(&req.task_title, req.dialogues)
        .await
        .map_err(|e| match e {
            CoachError::Disabled => {
                AppError::service_unavailable("COACH_DISABLED", "Coach completions are disabled")
            }
            CoachError::Timeout | CoachError::Network(_) | CoachError::ApiError { .. } => {
                tracing::error!(error = %e, "Coach completion failed");
                AppError::bad_gateway("COACH_UPSTREAM", "Coach completion failed upstream")
            }
        })?;

    Ok(ok(CompletionResponse { message }))
}
