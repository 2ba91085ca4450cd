//! Canned Response Generator - replies drawn from a fixed template list.
//!
//! Each call picks one template uniformly at random. No state is carried
//! between calls and the input text never influences the choice.
//!
//! # Example
//!
//! ```ignore
//! let generator = CannedResponseGenerator::new();
//! let reply = generator.generate("hello").await;
//! assert!(DEFAULT_RESPONSES.contains(&reply.as_str()));
//! ```

use async_trait::async_trait;
use rand::Rng;

use crate::domain::foundation::ValidationError;
use crate::ports::ResponseGenerator;

/// Templates used when no custom list is configured.
pub const DEFAULT_RESPONSES: [&str; 5] = [
    "Hi there! I'm a simulated AI assistant.",
    "Hello! This is a placeholder AI response.",
    "I'm just a dummy function pretending to be AI.",
    "That's an interesting point! Let me think about it...",
    "I understand what you're saying. Please tell me more!",
];

/// Generator that answers with a random canned template.
///
/// # Invariants
///
/// - `responses` is never empty
#[derive(Debug, Clone)]
pub struct CannedResponseGenerator {
    responses: Vec<String>,
}

impl Default for CannedResponseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CannedResponseGenerator {
    /// Creates a generator over [`DEFAULT_RESPONSES`].
    pub fn new() -> Self {
        Self {
            responses: DEFAULT_RESPONSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Creates a generator over a custom template list.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the list is empty
    pub fn with_responses(responses: Vec<String>) -> Result<Self, ValidationError> {
        if responses.is_empty() {
            return Err(ValidationError::empty_field("responses"));
        }
        Ok(Self { responses })
    }

    /// The templates this generator chooses from, in order.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    fn pick(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.responses.len());
        &self.responses[index]
    }
}

#[async_trait]
impl ResponseGenerator for CannedResponseGenerator {
    async fn generate(&self, input: &str) -> String {
        tracing::debug!(input = %input, "Generating canned response");
        self.pick().to_string()
    }

    fn name(&self) -> &str {
        "canned"
    }
}
