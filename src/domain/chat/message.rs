//! Message entity for the chat history.
//!
//! Messages are immutable records of one side of an exchange. The caller
//! builds a [`NewMessage`]; the store assigns the id and hands back a
//! [`StoredMessage`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp, ValidationError};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Author {
    /// The person chatting.
    User,
    /// The generated reply.
    #[serde(rename = "AI")]
    Ai,
}

impl Author {
    /// Stable label used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "User",
            Author::Ai => "AI",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Author {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Author::User),
            "AI" => Ok(Author::Ai),
            other => Err(ValidationError::invalid_format(
                "author",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A message that has not been persisted yet.
///
/// # Invariants
///
/// - `text` is non-blank (validated at construction)
/// - no id: ids are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    author: Author,
    text: String,
    timestamp: Timestamp,
}

impl NewMessage {
    /// Creates a message stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if text is blank
    pub fn new(author: Author, text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::at(author, text, Timestamp::now())
    }

    /// Creates a message with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if text is blank
    pub fn at(
        author: Author,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            author,
            text,
            timestamp,
        })
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Attaches the store-assigned id.
    pub fn into_stored(self, id: MessageId) -> StoredMessage {
        StoredMessage {
            id,
            author: self.author,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

/// A message as held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    pub timestamp: Timestamp,
}

/// One user message and the reply generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: StoredMessage,
    pub reply: StoredMessage,
}
