//! Sanitizer port.
//!
//! Strips active markup from text before it is stored or forwarded.

/// Port for text sanitization.
///
/// Implementations must be idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}
