//! Environment-driven configuration.
//!
//! All required settings are validated up front, before any network or
//! terminal I/O, so a misconfigured session fails with a clear message
//! instead of partway through a conversation.

use thiserror::Error;

/// Environment variable naming the user on whose behalf grants are requested
pub const USER_ID_VAR: &str = "SHEETGATE_USER_ID";

/// Environment variable naming the model to use for completions
pub const MODEL_VAR: &str = "SHEETGATE_MODEL";

/// Environment variable holding the OpenAI API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable pointing at the consent service
pub const CONSENT_URL_VAR: &str = "SHEETGATE_CONSENT_URL";

/// Optional override for the completions endpoint base URL
pub const API_BASE_VAR: &str = "OPENAI_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity for which tool grants are requested and checked
    pub user_id: String,

    /// Model name passed to the completions API
    pub model: String,

    /// API key for the model provider
    pub api_key: String,

    /// Base URL of the consent service
    pub consent_url: String,

    /// Optional base URL override for the model provider
    pub api_base: Option<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Returns the first missing required variable as an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            user_id: require(USER_ID_VAR)?,
            model: require(MODEL_VAR)?,
            api_key: require(API_KEY_VAR)?,
            consent_url: require(CONSENT_URL_VAR)?,
            api_base: std::env::var(API_BASE_VAR).ok().filter(|s| !s.is_empty()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_names_the_variable() {
        let err = ConfigError::Missing(USER_ID_VAR);
        assert!(err.to_string().contains("SHEETGATE_USER_ID"));
    }
}
