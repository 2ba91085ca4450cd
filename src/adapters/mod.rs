//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Response generators (canned templates, OpenAI-compatible API)
//! - `http` - Axum router for the chat page and API
//! - `memory` - Process-local message store
//! - `postgres` - PostgreSQL message store
//! - `sanitizer` - Markup stripping

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod sanitizer;

pub use ai::{CannedResponseGenerator, OpenAIConfig, OpenAIResponseGenerator};
pub use memory::InMemoryMessageStore;
pub use postgres::PostgresMessageStore;
pub use sanitizer::MarkupStripper;
