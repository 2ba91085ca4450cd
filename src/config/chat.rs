//! Chat history configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Chat history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of stored messages kept after each exchange
    #[serde(default = "default_max_messages")]
    pub max_messages: u64,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_messages == 0 {
            return Err(ValidationError::InvalidMaxMessages);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

fn default_max_messages() -> u64 {
    100
}
