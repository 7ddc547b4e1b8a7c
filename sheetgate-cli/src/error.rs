//! CLI-specific error types

use thiserror::Error;

/// Errors that can occur while running the REPL
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error (missing environment variables)
    #[error("Configuration error: {0}")]
    Config(#[from] sheetgate_core::ConfigError),

    /// Tool authorization failed during startup
    #[error("Authorization error: {0}")]
    Authorization(#[from] sheetgate_core::AuthorizationError),

    /// Consent service error during startup
    #[error("Consent service error: {0}")]
    Consent(#[from] sheetgate_core::ConsentError),

    /// Agent execution error
    #[error("Agent error: {0}")]
    Agent(#[from] sheetgate_core::AgentError),

    /// Agent construction error
    #[error("{0}")]
    Setup(#[from] sheetgate_core::Error),

    /// Readline/input error
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// IO error (stdout, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
