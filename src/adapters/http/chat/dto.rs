//! Data transfer objects for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{Author, Exchange, StoredMessage};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /chat/message`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One stored message as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageView {
    pub id: String,
    pub author: Author,
    pub text: String,
    /// RFC 3339
    pub timestamp: String,
}

impl From<&StoredMessage> for MessageView {
    fn from(message: &StoredMessage) -> Self {
        Self {
            id: message.id.to_string(),
            author: message.author,
            text: message.text.clone(),
            timestamp: message.timestamp.to_rfc3339(),
        }
    }
}

/// Response of a successful `POST /chat/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub status: String,
    pub user: MessageView,
    pub reply: MessageView,
}

impl From<&Exchange> for SendMessageResponse {
    fn from(exchange: &Exchange) -> Self {
        Self {
            status: "success".to_string(),
            user: MessageView::from(&exchange.user),
            reply: MessageView::from(&exchange.reply),
        }
    }
}

/// Error body returned by every chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            error: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MessageId, Timestamp};

    fn stored(id: &str, author: Author, text: &str) -> StoredMessage {
        StoredMessage {
            id: MessageId::new(id),
            author,
            text: text.to_string(),
            timestamp: Timestamp::now(),
        }
    }

    #[test]
    fn send_message_request_deserializes() {
        let req: SendMessageRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
    }

    #[test]
    fn send_message_request_requires_message_field() {
        let result: Result<SendMessageRequest, _> = serde_json::from_str(r#"{"text":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn message_view_uses_wire_author_names() {
        let view = MessageView::from(&stored("7", Author::Ai, "hello"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["author"], "AI");
        assert_eq!(json["text"], "hello");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn send_message_response_carries_both_messages() {
        let exchange = Exchange {
            user: stored("1", Author::User, "hi"),
            reply: stored("2", Author::Ai, "hello"),
        };
        let response = SendMessageResponse::from(&exchange);
        assert_eq!(response.status, "success");
        assert_eq!(response.user.author, Author::User);
        assert_eq!(response.reply.id, "2");
    }

    #[test]
    fn error_response_codes() {
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL_ERROR");
    }
}
