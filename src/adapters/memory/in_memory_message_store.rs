//! In-memory message store implementation.
//!
//! This adapter provides an in-memory implementation of the `MessageStore` port.
//! Useful for:
//! - Development and testing environments
//! - Single-process deployments that do not need history across restarts
//!
//! For persistence, use `PostgresMessageStore` instead.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::chat::{NewMessage, StoredMessage};
use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{InsertResult, MessageStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    message: StoredMessage,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    entries: Vec<Entry>,
}

/// In-memory implementation of the MessageStore port.
///
/// Ids are a monotonically increasing sequence rendered as strings. They are
/// never reused, not even after `clear_all`.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    inner: RwLock<Inner>,
}

impl InMemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries sorted by `(timestamp, seq)`, newest last.
    fn ordered(entries: &[Entry]) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.message
                .timestamp
                .cmp(&b.message.timestamp)
                .then(a.seq.cmp(&b.seq))
        });
        sorted
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: &NewMessage) -> Result<InsertResult, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_seq += 1;
        let seq = inner.next_seq;
        let id = MessageId::new(seq.to_string());
        inner.entries.push(Entry {
            seq,
            message: message.clone().into_stored(id.clone()),
        });
        Ok(InsertResult::acknowledged(id))
    }

    async fn retrieve_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let inner = self.inner.read().await;
        Ok(Self::ordered(&inner.entries)
            .into_iter()
            .map(|e| e.message.clone())
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.entries.len() as u64)
    }

    async fn cutoff_at_rank(&self, rank: u64) -> Result<Option<Timestamp>, StoreError> {
        if rank == 0 {
            return Ok(None);
        }
        let inner = self.inner.read().await;
        let ordered = Self::ordered(&inner.entries);
        Ok(ordered
            .iter()
            .rev()
            .nth((rank - 1) as usize)
            .map(|e| e.message.timestamp))
    }

    async fn delete_up_to(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|e| e.message.timestamp > cutoff);
        Ok((before - inner.entries.len()) as u64)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.inner.write().await.entries.clear();
        Ok(())
    }
}
