//! PostgreSQL implementation of MessageStore.
//!
//! Persists chat messages to the `chat_messages` table. Ids are the table's
//! `BIGSERIAL` key rendered as a string.
//!
//! Queries use the runtime-checked `sqlx::query` form so no database is
//! needed at compile time. Migrations under `./migrations` are embedded with
//! `sqlx::migrate!` and applied by [`PostgresMessageStore::connect`] when
//! `run_migrations` is enabled.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::chat::{Author, NewMessage, StoredMessage};
use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{InsertResult, MessageStore, StoreError};

/// PostgreSQL implementation of MessageStore.
#[derive(Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from configuration, optionally applying migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to connect: {}", e)))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| StoreError::Database(format!("Failed to run migrations: {}", e)))?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn insert(&self, message: &NewMessage) -> Result<InsertResult, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO chat_messages (author, text, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(message.author().as_str())
        .bind(message.text())
        .bind(message.timestamp().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to insert message: {}", e)))?;

        // RETURNING yields the row only once the insert is committed.
        match row {
            Some(row) => {
                let id: i64 = row.get("id");
                Ok(InsertResult::acknowledged(MessageId::from(id)))
            }
            None => Ok(InsertResult::unacknowledged(MessageId::new(""))),
        }
    }

    async fn retrieve_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, author, text, created_at
            FROM chat_messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to fetch messages: {}", e)))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to count messages: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn cutoff_at_rank(&self, rank: u64) -> Result<Option<Timestamp>, StoreError> {
        if rank == 0 {
            return Ok(None);
        }

        let cutoff: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT created_at
            FROM chat_messages
            ORDER BY created_at DESC, id DESC
            OFFSET $1
            LIMIT 1
            "#,
        )
        .bind((rank - 1) as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to find cutoff: {}", e)))?;

        Ok(cutoff.map(Timestamp::from_datetime))
    }

    async fn delete_up_to(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE created_at <= $1")
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to delete messages: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM chat_messages")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to clear messages: {}", e)))?;

        Ok(())
    }
}

fn row_to_message(row: &PgRow) -> Result<StoredMessage, StoreError> {
    let id: i64 = row.get("id");
    let author: String = row.get("author");
    let created_at: DateTime<Utc> = row.get("created_at");

    Ok(StoredMessage {
        id: MessageId::from(id),
        author: str_to_author(&author)?,
        text: row.get("text"),
        timestamp: Timestamp::from_datetime(created_at),
    })
}

fn str_to_author(s: &str) -> Result<Author, StoreError> {
    s.parse()
        .map_err(|_| StoreError::Corrupt(format!("Invalid author: {}", s)))
}
