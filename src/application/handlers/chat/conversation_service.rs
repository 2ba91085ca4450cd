//! ConversationService - handles one inbound chat message.
//!
//! Per message: validate, sanitize, persist the user message, generate a
//! reply, sanitize and persist the reply, then enforce retention.
//!
//! There is no rollback. If the reply insert fails the user message stays
//! stored and the caller sees a storage error.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::chat::{Author, Exchange, NewMessage, StoredMessage};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::{MessageStore, ResponseGenerator, Sanitizer, StoreError, FALLBACK_RESPONSE};

use super::RetentionPolicy;

/// Errors surfaced to callers of [`ConversationService::handle`].
///
/// Generator failures never appear here; they degrade to a fallback reply.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    /// Input was blank before or after sanitization.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed or did not acknowledge a write.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Orchestrates store, generator, sanitizer and retention for each message.
pub struct ConversationService {
    store: Arc<dyn MessageStore>,
    generator: Arc<dyn ResponseGenerator>,
    sanitizer: Arc<dyn Sanitizer>,
    retention: RetentionPolicy,
}

impl ConversationService {
    /// Creates a new service with the given dependencies.
    pub fn new(
        store: Arc<dyn MessageStore>,
        generator: Arc<dyn ResponseGenerator>,
        sanitizer: Arc<dyn Sanitizer>,
        retention: RetentionPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            sanitizer,
            retention,
        }
    }

    /// The store this service writes to.
    pub fn store(&self) -> Arc<dyn MessageStore> {
        Arc::clone(&self.store)
    }

    /// Handles one raw user message.
    ///
    /// # Errors
    ///
    /// - `Validation` if the text is blank, or blank once markup is stripped
    /// - `Storage` if either insert or the retention pass fails
    pub async fn handle(&self, raw_text: &str) -> Result<Exchange, ConversationError> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let text = self.sanitizer.sanitize(trimmed);
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let user_message = NewMessage::new(Author::User, text)?;
        let user = self.persist(user_message).await?;
        tracing::info!(
            id = %user.id,
            length = user.text.len(),
            timestamp = %user.timestamp.to_rfc3339(),
            "Stored user message"
        );

        let generated = self.generator.generate(&user.text).await;
        let reply_text = self.sanitize_reply(&generated);
        let reply_message = NewMessage::at(
            Author::Ai,
            reply_text,
            Timestamp::now_not_before(user.timestamp),
        )?;
        let reply = self.persist(reply_message).await?;
        tracing::info!(
            id = %reply.id,
            generator = self.generator.name(),
            length = reply.text.len(),
            timestamp = %reply.timestamp.to_rfc3339(),
            "Stored generated reply"
        );

        self.retention.enforce(self.store.as_ref()).await?;

        Ok(Exchange { user, reply })
    }

    fn sanitize_reply(&self, generated: &str) -> String {
        let cleaned = self.sanitizer.sanitize(generated);
        if cleaned.trim().is_empty() {
            tracing::warn!(
                generator = self.generator.name(),
                "Generated reply was blank after sanitization, using fallback"
            );
            return FALLBACK_RESPONSE.to_string();
        }
        cleaned
    }

    async fn persist(&self, message: NewMessage) -> Result<StoredMessage, StoreError> {
        let result = self.store.insert(&message).await?;
        if !result.acknowledged {
            return Err(StoreError::NotAcknowledged(result.id));
        }
        Ok(message.into_stored(result.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMessageStore;
    use crate::adapters::sanitizer::MarkupStripper;
    use crate::domain::foundation::MessageId;
    use crate::ports::InsertResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct FixedGenerator {
        reply: String,
        inputs: Mutex<Vec<String>>,
    }

    impl FixedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                inputs: Mutex::new(Vec::new()),
            }
        }

        fn inputs(&self) -> Vec<String> {
            self.inputs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResponseGenerator for FixedGenerator {
        async fn generate(&self, input: &str) -> String {
            self.inputs.lock().unwrap().push(input.to_string());
            self.reply.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Delegates to an in-memory store but refuses selected inserts.
    struct FlakyStore {
        inner: InMemoryMessageStore,
        inserts: Mutex<usize>,
        unacknowledged_on: Option<usize>,
        fail_on: Option<usize>,
    }

    impl FlakyStore {
        fn unacknowledged_on(n: usize) -> Self {
            Self {
                inner: InMemoryMessageStore::new(),
                inserts: Mutex::new(0),
                unacknowledged_on: Some(n),
                fail_on: None,
            }
        }

        fn failing_on(n: usize) -> Self {
            Self {
                inner: InMemoryMessageStore::new(),
                inserts: Mutex::new(0),
                unacknowledged_on: None,
                fail_on: Some(n),
            }
        }
    }

    #[async_trait]
    impl MessageStore for FlakyStore {
        async fn insert(&self, message: &NewMessage) -> Result<InsertResult, StoreError> {
            let n = {
                let mut inserts = self.inserts.lock().unwrap();
                *inserts += 1;
                *inserts
            };
            if self.fail_on == Some(n) {
                return Err(StoreError::Database("connection reset".to_string()));
            }
            if self.unacknowledged_on == Some(n) {
                return Ok(InsertResult::unacknowledged(MessageId::new("lost")));
            }
            self.inner.insert(message).await
        }

        async fn retrieve_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
            self.inner.retrieve_all().await
        }

        async fn count(&self) -> Result<u64, StoreError> {
            self.inner.count().await
        }

        async fn cutoff_at_rank(&self, rank: u64) -> Result<Option<Timestamp>, StoreError> {
            self.inner.cutoff_at_rank(rank).await
        }

        async fn delete_up_to(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
            self.inner.delete_up_to(cutoff).await
        }

        async fn clear_all(&self) -> Result<(), StoreError> {
            self.inner.clear_all().await
        }
    }

    fn service_with(
        store: Arc<dyn MessageStore>,
        generator: Arc<dyn ResponseGenerator>,
        max_messages: u64,
    ) -> ConversationService {
        ConversationService::new(
            store,
            generator,
            Arc::new(MarkupStripper::new()),
            RetentionPolicy::new(max_messages).unwrap(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn blank_input_is_rejected_without_storing() {
        let store = Arc::new(InMemoryMessageStore::new());
        let generator = Arc::new(FixedGenerator::new("reply"));
        let service = service_with(store.clone(), generator.clone(), 100);

        for input in ["", "   ", "\n\t"] {
            let err = service.handle(input).await.unwrap_err();
            assert!(matches!(err, ConversationError::Validation(_)));
        }
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(generator.inputs().is_empty());
    }

    #[tokio::test]
    async fn markup_only_input_is_rejected() {
        let store = Arc::new(InMemoryMessageStore::new());
        let service = service_with(store.clone(), Arc::new(FixedGenerator::new("reply")), 100);

        let err = service.handle("<script>alert(1)</script>").await.unwrap_err();
        assert!(matches!(err, ConversationError::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn handle_stores_user_then_reply() {
        let store = Arc::new(InMemoryMessageStore::new());
        let service = service_with(store.clone(), Arc::new(FixedGenerator::new("hello back")), 100);

        let before = store.count().await.unwrap();
        let exchange = service.handle("hi").await.unwrap();
        assert_eq!(store.count().await.unwrap(), before + 2);

        let all = store.retrieve_all().await.unwrap();
        let last_two = &all[all.len() - 2..];
        assert_eq!(last_two[0].author, Author::User);
        assert_eq!(last_two[0].text, "hi");
        assert_eq!(last_two[1].author, Author::Ai);
        assert_eq!(last_two[1].text, "hello back");
        assert!(last_two[0].timestamp <= last_two[1].timestamp);

        assert_eq!(exchange.user, last_two[0]);
        assert_eq!(exchange.reply, last_two[1]);
    }

    #[tokio::test]
    async fn input_is_trimmed_and_sanitized_before_generation() {
        let store = Arc::new(InMemoryMessageStore::new());
        let generator = Arc::new(FixedGenerator::new("ok"));
        let service = service_with(store.clone(), generator.clone(), 100);

        let exchange = service.handle("  <b>hey</b> you  ").await.unwrap();
        assert_eq!(exchange.user.text, "hey you");
        assert_eq!(generator.inputs(), vec!["hey you".to_string()]);
    }

    #[tokio::test]
    async fn reply_is_sanitized() {
        let store = Arc::new(InMemoryMessageStore::new());
        let generator = Arc::new(FixedGenerator::new("<i>sure</i><script>x()</script>"));
        let service = service_with(store, generator, 100);

        let exchange = service.handle("hi").await.unwrap();
        assert_eq!(exchange.reply.text, "sure");
    }

    #[tokio::test]
    async fn blank_reply_after_sanitization_uses_fallback() {
        let store = Arc::new(InMemoryMessageStore::new());
        let service = service_with(store, Arc::new(FixedGenerator::new("<p></p>")), 100);

        let exchange = service.handle("hi").await.unwrap();
        assert_eq!(exchange.reply.text, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn retention_runs_after_each_exchange() {
        let store = Arc::new(InMemoryMessageStore::new());
        let service = service_with(store.clone(), Arc::new(FixedGenerator::new("r")), 5);

        for i in 0..6 {
            service.handle(&format!("msg {}", i)).await.unwrap();
            assert!(store.count().await.unwrap() <= 5);
        }
        let all = store.retrieve_all().await.unwrap();
        assert_eq!(all.last().unwrap().author, Author::Ai);
    }

    #[tokio::test]
    async fn unacknowledged_user_insert_is_storage_error() {
        let store = Arc::new(FlakyStore::unacknowledged_on(1));
        let generator = Arc::new(FixedGenerator::new("r"));
        let service = service_with(store.clone(), generator.clone(), 100);

        let err = service.handle("hi").await.unwrap_err();
        assert!(matches!(
            err,
            ConversationError::Storage(StoreError::NotAcknowledged(_))
        ));
        assert!(generator.inputs().is_empty());
    }

    #[tokio::test]
    async fn failed_reply_insert_keeps_user_message() {
        let store = Arc::new(FlakyStore::failing_on(2));
        let service = service_with(store.clone(), Arc::new(FixedGenerator::new("r")), 100);

        let err = service.handle("hi").await.unwrap_err();
        assert!(matches!(err, ConversationError::Storage(StoreError::Database(_))));

        let all = store.retrieve_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].author, Author::User);
        assert_eq!(all[0].text, "hi");
    }
}
