//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `chat` - Chat messages and exchanges

pub mod chat;
pub mod foundation;
