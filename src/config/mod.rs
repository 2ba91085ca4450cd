//! Application configuration module
//!
//! Configuration is read from environment variables with the `PARLEY`
//! prefix; nested values use a double underscore as separator. Every
//! section has defaults, so an empty environment yields a runnable
//! in-memory service with canned replies.
//!
//! # Example
//!
//! ```no_run
//! use parley::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod chat;
mod database;
mod error;
mod server;

pub use ai::{AiConfig, GeneratorKind};
pub use chat::ChatConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Message store selection and PostgreSQL pool
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Response generator selection
    #[serde(default)]
    pub ai: AiConfig,

    /// History retention
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `PARLEY__*` variables:
    ///
    /// - `PARLEY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PARLEY__CHAT__MAX_MESSAGES=50` -> `chat.max_messages = 50`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARLEY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.chat.validate()?;

        // Completion calls must time out before the request layer does
        if self.ai.generator == GeneratorKind::OpenAI
            && self.ai.timeout_secs >= self.server.request_timeout_secs
        {
            return Err(ValidationError::AiTimeoutNotBelowRequestTimeout {
                ai_secs: self.ai.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
