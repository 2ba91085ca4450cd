//! Response Generator Port - Interface for producing chat replies.
//!
//! Abstracts where replies come from (canned templates, a remote completion
//! API) so the conversation service never couples to a specific strategy.
//!
//! # Design
//!
//! - `generate` is infallible at the port: strategies that can fail absorb
//!   the failure and return a degraded reply instead
//! - `GenerationError` classifies upstream failures for logging inside the
//!   strategy; it never crosses this port

use async_trait::async_trait;

/// Reply returned when a remote strategy cannot produce one.
pub const FALLBACK_RESPONSE: &str = "I apologize, but I'm having trouble processing your request.";

/// Port for reply generation.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Produce a reply for the given (already sanitized) input.
    async fn generate(&self, input: &str) -> String;

    /// Short strategy name for logs (e.g., "canned", "openai").
    fn name(&self) -> &str;
}

/// Upstream failures observed by remote strategies.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by provider.
    #[error("rate limited by upstream")]
    RateLimited,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered without any completion.
    #[error("response contained no completion")]
    EmptyCompletion,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_generator_is_object_safe() {
        fn _accepts_dyn(_generator: &dyn ResponseGenerator) {}
    }

    #[test]
    fn generation_error_displays_correctly() {
        let err = GenerationError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "request timed out after 30s");

        let err = GenerationError::unavailable("Server error 503");
        assert_eq!(err.to_string(), "provider unavailable: Server error 503");

        assert_eq!(
            GenerationError::EmptyCompletion.to_string(),
            "response contained no completion"
        );
    }

    #[test]
    fn fallback_is_not_blank() {
        assert!(!FALLBACK_RESPONSE.trim().is_empty());
    }
}
