//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the conversation service and the
//! history query.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::application::handlers::chat::{ConversationError, ConversationService, GetHistoryHandler};

use super::dto::{ErrorResponse, MessageView, SendMessageRequest, SendMessageResponse};

const INDEX_HTML: &str = include_str!("index.html");

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub service: Arc<ConversationService>,
    pub history: Arc<GetHistoryHandler>,
}

impl ChatAppState {
    /// Builds state around a service; history reads the same store.
    pub fn new(service: Arc<ConversationService>) -> Self {
        let history = Arc::new(GetHistoryHandler::new(service.store()));
        Self { service, history }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - The chat page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /chat/message
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat/message - Submit a message and receive the reply.
///
/// # Errors
/// - 400 Bad Request: body is not `{"message": string}`, or the message is blank
/// - 500 Internal Server Error: the store failed
pub async fn send_message(
    State(state): State<ChatAppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChatApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected chat request body: {}", rejection.body_text());
        ChatApiError::BadRequest("Invalid request format".to_string())
    })?;

    let exchange = state
        .service
        .handle(&request.message)
        .await
        .map_err(|e| match e {
            ConversationError::Validation(err) => {
                tracing::warn!("Rejected chat message: {}", err);
                ChatApiError::BadRequest("Message cannot be empty".to_string())
            }
            ConversationError::Storage(err) => ChatApiError::Internal(err.to_string()),
        })?;

    tracing::info!(
        user_id = %exchange.user.id,
        reply_id = %exchange.reply.id,
        "Processed chat message"
    );

    Ok((StatusCode::OK, Json(SendMessageResponse::from(&exchange))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /chat/history
// ════════════════════════════════════════════════════════════════════════════════

/// GET /chat/history - Every stored message, oldest first.
///
/// # Errors
/// - 500 Internal Server Error: the store failed
pub async fn get_history(
    State(state): State<ChatAppState>,
) -> Result<impl IntoResponse, ChatApiError> {
    let messages = state
        .history
        .handle()
        .await
        .map_err(|e| ChatApiError::HistoryUnavailable(e.to_string()))?;

    let views: Vec<MessageView> = messages.iter().map(MessageView::from).collect();
    Ok((StatusCode::OK, Json(views)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts service errors to HTTP responses.
///
/// Internal variants carry detail for the log only.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    Internal(String),
    HistoryUnavailable(String),
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ChatApiError::Internal(msg) => {
                tracing::error!("Error processing message: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Internal server error"),
                )
            }
            ChatApiError::HistoryUnavailable(msg) => {
                tracing::error!("Error retrieving chat history: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Error retrieving chat history"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
