//! Axum routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_history, index, send_message, ChatAppState};

/// Creates routes for chat endpoints.
///
/// - GET / - Chat page
/// - POST /chat/message - Submit a message
/// - GET /chat/history - Full history, oldest first
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/", get(index))
        .route("/chat/message", post(send_message))
        .route("/chat/history", get(get_history))
}
