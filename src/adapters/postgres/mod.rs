//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMessageStore` - Persistent chat history

mod message_store;

pub use message_store::PostgresMessageStore;
