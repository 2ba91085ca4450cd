//! Chat command and query handlers.
//!
//! Handles inbound messages, history reads and history retention.

mod conversation_service;
mod get_history;
mod retention;

pub use conversation_service::{ConversationError, ConversationService};
pub use get_history::GetHistoryHandler;
pub use retention::RetentionPolicy;
