//! Message store port.
//!
//! Defines the contract for durable, ordered storage of chat messages.
//! Implementations handle the actual persistence.
//!
//! # Design
//!
//! - **Store-assigned ids**: callers hand over a `NewMessage`, the store
//!   returns the id it picked
//! - **Acknowledgement is data**: an unacknowledged write is reported through
//!   `InsertResult::acknowledged`, backend failures through `StoreError`
//! - **Timestamp ordering**: retrieval and rank queries order by
//!   `(timestamp, insertion order)`

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::{NewMessage, StoredMessage};
use crate::domain::foundation::{MessageId, Timestamp};

/// Outcome of a single insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// Id assigned by the backend.
    pub id: MessageId,
    /// Whether the backend confirmed the write.
    pub acknowledged: bool,
}

impl InsertResult {
    pub fn acknowledged(id: MessageId) -> Self {
        Self {
            id,
            acknowledged: true,
        }
    }

    pub fn unacknowledged(id: MessageId) -> Self {
        Self {
            id,
            acknowledged: false,
        }
    }
}

/// Backend read/write failures.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),

    /// A write was not confirmed by the backend.
    #[error("write not acknowledged for message {0}")]
    NotAcknowledged(MessageId),

    /// A persisted row could not be mapped back to a message.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Port for chat message persistence.
///
/// Implementations must ensure:
/// - Inserts never silently drop a message
/// - `retrieve_all` on an empty store returns an empty list
/// - `delete_up_to` is inclusive and idempotent
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message, assigning it an id.
    async fn insert(&self, message: &NewMessage) -> Result<InsertResult, StoreError>;

    /// All messages, oldest first.
    async fn retrieve_all(&self) -> Result<Vec<StoredMessage>, StoreError>;

    /// Number of stored messages.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Timestamp of the `rank`-th most recent message (1 = newest).
    ///
    /// Returns `None` if fewer than `rank` messages exist or `rank` is 0.
    async fn cutoff_at_rank(&self, rank: u64) -> Result<Option<Timestamp>, StoreError>;

    /// Remove every message with `timestamp <= cutoff`.
    ///
    /// Returns how many messages were removed.
    async fn delete_up_to(&self, cutoff: Timestamp) -> Result<u64, StoreError>;

    /// Remove every message. Test setup and reset only.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
