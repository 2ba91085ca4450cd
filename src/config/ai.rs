//! Response generator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Response generation strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Random canned templates
    #[default]
    Canned,
    /// OpenAI-compatible chat completions
    OpenAI,
}

/// Response generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Strategy selected at startup
    #[serde(default)]
    pub generator: GeneratorKind,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upstream request timeout in seconds; must stay below
    /// `server.request_timeout_secs`
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generator == GeneratorKind::OpenAI {
            if !self.has_openai() {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidAiBaseUrl);
            }
            if self.timeout_secs == 0 {
                return Err(ValidationError::InvalidTimeout);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openai_with_key(key: &str) -> AiConfig {
        AiConfig {
            generator: GeneratorKind::OpenAI,
            openai_api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.generator, GeneratorKind::Canned);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_canned_needs_no_key() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_openai_requires_key() {
        let config = AiConfig {
            generator: GeneratorKind::OpenAI,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        ));
        assert!(openai_with_key("").validate().is_err());
    }

    #[test]
    fn test_openai_rejects_bad_base_url() {
        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..openai_with_key("sk-xxx")
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAiBaseUrl)
        ));
    }

    #[test]
    fn test_validation_valid_openai_config() {
        assert!(openai_with_key("sk-xxx").validate().is_ok());
    }
}
