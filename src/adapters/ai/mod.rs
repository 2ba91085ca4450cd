//! Response Generator Adapters.
//!
//! Implementations of the ResponseGenerator port.
//!
//! ## Available Adapters
//!
//! - `CannedResponseGenerator` - Random pick from fixed templates
//! - `OpenAIResponseGenerator` - OpenAI-compatible chat completions with fallback

mod canned_generator;
mod openai_generator;

pub use canned_generator::{CannedResponseGenerator, DEFAULT_RESPONSES};
pub use openai_generator::{OpenAIConfig, OpenAIResponseGenerator};
