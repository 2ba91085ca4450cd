//! Parley - Minimal chat service
//!
//! Accepts a user message, stores it, produces a reply through a pluggable
//! generator, stores the reply and trims history to a configured maximum.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
