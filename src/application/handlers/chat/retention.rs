//! Retention policy - caps the stored history at `max_messages`.
//!
//! Eviction is bulk and bounded by timestamp: once the store exceeds the
//! cap, everything at or before the timestamp of the `max_messages`-th most
//! recent message is deleted in one call. When several messages share the
//! cutoff timestamp they are all evicted, so the count can land below
//! `max_messages - 1`.
//!
//! Reading the count and deleting are separate store calls. Concurrent
//! exchanges can make the stored count drift slightly around the cap.

use crate::domain::foundation::ValidationError;
use crate::ports::{MessageStore, StoreError};

/// Keeps the message store at or below a maximum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    max_messages: u64,
}

impl RetentionPolicy {
    /// Creates a policy with the given cap.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `max_messages` is 0
    pub fn new(max_messages: u64) -> Result<Self, ValidationError> {
        if max_messages == 0 {
            return Err(ValidationError::invalid_format(
                "max_messages",
                "must be greater than zero",
            ));
        }
        Ok(Self { max_messages })
    }

    pub fn max_messages(&self) -> u64 {
        self.max_messages
    }

    /// Evicts the oldest messages if the store is over the cap.
    ///
    /// Returns the number of messages removed. Running it again without an
    /// intervening insert removes nothing.
    pub async fn enforce(&self, store: &dyn MessageStore) -> Result<u64, StoreError> {
        let total = store.count().await?;
        if total <= self.max_messages {
            return Ok(0);
        }

        let Some(cutoff) = store.cutoff_at_rank(self.max_messages).await? else {
            return Ok(0);
        };

        let removed = store.delete_up_to(cutoff).await?;
        tracing::debug!(
            total,
            removed,
            max_messages = self.max_messages,
            cutoff = %cutoff.to_rfc3339(),
            "Evicted messages over retention cap"
        );
        Ok(removed)
    }
}
