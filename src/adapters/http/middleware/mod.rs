//! HTTP middleware for axum.
//!
//! - `cors` - CORS layer built from configured origins

pub mod cors;

pub use cors::cors_layer;
