//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MessageStore` - Durable ordered message storage
//! - `ResponseGenerator` - Reply generation strategies
//! - `Sanitizer` - Markup stripping for inbound and generated text

mod message_store;
mod response_generator;
mod sanitizer;

pub use message_store::{InsertResult, MessageStore, StoreError};
pub use response_generator::{GenerationError, ResponseGenerator, FALLBACK_RESPONSE};
pub use sanitizer::Sanitizer;
