//! GetHistoryHandler - Query handler for the full chat history.

use std::sync::Arc;

use crate::domain::chat::StoredMessage;
use crate::ports::{MessageStore, StoreError};

/// Handler for reading the conversation history.
pub struct GetHistoryHandler {
    store: Arc<dyn MessageStore>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Every stored message, oldest first.
    pub async fn handle(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let messages = self.store.retrieve_all().await?;
        tracing::info!("Retrieved {} chat messages from history", messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMessageStore;
    use crate::domain::chat::{Author, NewMessage};

    #[tokio::test]
    async fn empty_history_is_empty_list() {
        let handler = GetHistoryHandler::new(Arc::new(InMemoryMessageStore::new()));
        assert!(handler.handle().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_returns_stored_messages_in_order() {
        let store = Arc::new(InMemoryMessageStore::new());
        store.insert(&NewMessage::new(Author::User, "q").unwrap()).await.unwrap();
        store.insert(&NewMessage::new(Author::Ai, "a").unwrap()).await.unwrap();

        let handler = GetHistoryHandler::new(store);
        let history = handler.handle().await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].author, Author::User);
        assert_eq!(history[1].author, Author::Ai);
    }
}
