//! HTTP handlers and error → status mapping.

use super::dto::{
    ConversationResponse, CreateConversationParams, MessageResponse, SendMessageRequest,
};
use super::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use errand_application::TurnError;
use tracing::error;

/// Status a turn error maps to. Not-found stays distinguishable; every
/// other orchestration failure is an opaque internal error, and no partial
/// state beyond what was already persisted is exposed.
pub fn status_for(error: &TurnError) -> StatusCode {
    match error {
        TurnError::ConversationNotFound(_) => StatusCode::NOT_FOUND,
        TurnError::Planning(_) | TurnError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn turn_error_response(error: TurnError) -> (StatusCode, String) {
    let status = status_for(&error);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %error, "Turn failed");
    }
    (status, error.to_string())
}

/// `POST /conversations`
pub async fn create_conversation(
    State(state): State<AppState>,
    Query(params): Query<CreateConversationParams>,
) -> impl IntoResponse {
    match state.start.execute(&params.user_id).await {
        Ok(conversation) => (
            StatusCode::CREATED,
            Json(ConversationResponse::from(&conversation)),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create conversation");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// `GET /conversations/{id}`
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<u64>,
) -> impl IntoResponse {
    match state.history.conversation(conversation_id).await {
        Ok(conversation) => Json(ConversationResponse::from(&conversation)).into_response(),
        Err(e) => turn_error_response(e).into_response(),
    }
}

/// `POST /conversations/{id}/messages`
pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<u64>,
    Json(request): Json<SendMessageRequest>,
) -> impl IntoResponse {
    if request.content.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "content must not be blank".to_string())
            .into_response();
    }

    match state.send.execute(conversation_id, &request.content).await {
        Ok(message) => Json(MessageResponse::from(&message)).into_response(),
        Err(e) => turn_error_response(e).into_response(),
    }
}

/// `GET /conversations/{id}/history`
pub async fn get_history(
    State(state): State<AppState>,
    Path(conversation_id): Path<u64>,
) -> impl IntoResponse {
    match state.history.messages(conversation_id).await {
        Ok(messages) => {
            let body: Vec<MessageResponse> = messages.iter().map(MessageResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => turn_error_response(e).into_response(),
    }
}

/// `GET /providers/status`
pub async fn providers_status(State(state): State<AppState>) -> impl IntoResponse {
    state.factory.status_report()
}
