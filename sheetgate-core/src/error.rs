use thiserror::Error;

/// Top-level error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Authorization error: {0}")]
    Authorization(#[from] crate::consent::AuthorizationError),

    #[error("Consent service error: {0}")]
    Consent(#[from] crate::consent::ConsentError),

    #[error("Provider error: {0}")]
    Provider(#[from] crate::provider::ProviderError),

    #[error("Tool error: {0}")]
    Tool(#[from] crate::tool::ToolError),

    #[error("Agent error: {0}")]
    Agent(#[from] crate::agent::AgentError),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
