//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to a message by the store that persisted it.
///
/// Backends encode their native key (a sequence number, a database serial)
/// as a string; callers never see or construct the native handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps a backend-specific key.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(serial: i64) -> Self {
        Self(serial.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_displays_raw_value() {
        let id = MessageId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn message_id_from_serial() {
        assert_eq!(MessageId::from(7_i64), MessageId::new("7"));
    }

    #[test]
    fn message_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&MessageId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
