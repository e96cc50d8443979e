//! HTTP facing layer.
//!
//! Thin axum router over the use cases: the three conversation operations
//! plus the provider diagnostics query. All orchestration lives below; the
//! handlers only translate between HTTP and the application layer.

pub mod dto;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use errand_application::{GetHistoryUseCase, SendMessageUseCase, StartConversationUseCase};
use errand_domain::ProviderFactory;
use std::sync::Arc;

/// Shared handler state: the wired use cases plus the provider factory
/// for the status query.
#[derive(Clone)]
pub struct AppState {
    pub start: Arc<StartConversationUseCase>,
    pub send: Arc<SendMessageUseCase>,
    pub history: Arc<GetHistoryUseCase>,
    pub factory: Arc<ProviderFactory>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/conversations", post(handlers::create_conversation))
        .route("/conversations/:id", get(handlers::get_conversation))
        .route(
            "/conversations/:id/messages",
            post(handlers::send_message),
        )
        .route("/conversations/:id/history", get(handlers::get_history))
        .route("/providers/status", get(handlers::providers_status))
        .with_state(state)
}
