//! HTTP adapters - REST API implementations.

pub mod chat;
pub mod middleware;

pub use chat::{chat_routes, ChatAppState};

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::config::ServerConfig;

/// Full application router with tracing, timeout and CORS layers.
pub fn app_router(state: ChatAppState, config: &ServerConfig) -> Router {
    chat_routes()
        .with_state(state)
        .layer(middleware::cors_layer(config))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::ai::CannedResponseGenerator;
    use crate::adapters::memory::InMemoryMessageStore;
    use crate::adapters::sanitizer::MarkupStripper;
    use crate::application::handlers::chat::{ConversationService, RetentionPolicy};

    fn state() -> ChatAppState {
        let service = ConversationService::new(
            Arc::new(InMemoryMessageStore::new()),
            Arc::new(CannedResponseGenerator::new()),
            Arc::new(MarkupStripper::new()),
            RetentionPolicy::new(10).unwrap(),
        );
        ChatAppState::new(Arc::new(service))
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };
        let response = app_router(state(), &config)
            .oneshot(
                Request::builder()
                    .uri("/chat/history")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = app_router(state(), &ServerConfig::default())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
