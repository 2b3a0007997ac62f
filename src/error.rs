// Centralized error handling using thiserror for type-safe error management
//
// Two failure classes exist and they travel differently:
// - Construction failures (missing credential, unusable prompt template, bad
//   configuration values) are returned as `LookupError` from constructors.
// - Per-query failures never surface as `LookupError`; the dispatcher folds
//   them into a `LookupResult`. The only transport variant is for building
//   the HTTP client during construction.

use thiserror::Error;

/// Main error type for the person lookup crate
///
/// Constructors return these directly; use `is_configuration_error` to tell
/// setup problems apart from transport failures.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Required environment variable missing (the API key)
    ///
    /// The message names the variable and the constructor argument that
    /// could have supplied the value instead.
    #[error("Environment error: {0}")]
    EnvError(String),

    /// Prompt template could not be located or rendered
    ///
    /// Carries the underlying minijinja cause in the message.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Configuration value present but invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client could not be created (TLS backend, invalid settings)
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl LookupError {
    /// True for the failures that make an agent instance unusable
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LookupError::EnvError(_) | LookupError::TemplateError(_) | LookupError::ConfigError(_)
        )
    }
}

/// Type alias for Result with LookupError
pub type Result<T> = std::result::Result<T, LookupError>;
