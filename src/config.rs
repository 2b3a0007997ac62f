// Configuration loading: credential resolution plus optional overrides
//
// Sensitive data (the API key) comes from the explicit constructor argument or
// the environment (optionally seeded from a .env file via dotenvy). Everything
// else has a default and can be overridden through PERSON_LOOKUP_* variables.
// Configuration is read once when an agent is built and never re-read.

use crate::error::{LookupError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the hosted agent API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

pub const MODEL_ENV_VAR: &str = "PERSON_LOOKUP_MODEL";
pub const PROMPTS_DIR_ENV_VAR: &str = "PERSON_LOOKUP_PROMPTS_DIR";
pub const API_BASE_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const TIMEOUT_ENV_VAR: &str = "PERSON_LOOKUP_TIMEOUT_SECS";
pub const EXPORT_KEY_ENV_VAR: &str = "PERSON_LOOKUP_EXPORT_KEY";

/// Model used for every lookup unless overridden at configuration time
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Opaque API secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Write the key back into `OPENAI_API_KEY`
    ///
    /// Only needed by downstream clients that discover the key from the
    /// process environment instead of taking it as an argument. Mutates
    /// process-global state.
    pub fn export_to_env(&self) {
        std::env::set_var(API_KEY_ENV_VAR, &self.0);
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Resolve the API key: explicit argument first, then `OPENAI_API_KEY`
///
/// Empty strings count as absent in both places.
///
/// # Errors
/// - `LookupError::EnvError` naming `OPENAI_API_KEY` when neither source has a key
pub fn resolve_credential(explicit: Option<&str>) -> Result<Credential> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(Credential(key.to_string()));
    }

    match std::env::var(API_KEY_ENV_VAR) {
        Ok(key) if !key.is_empty() => Ok(Credential(key)),
        _ => Err(LookupError::EnvError(format!(
            "OpenAI API key must be provided or set in {} environment variable",
            API_KEY_ENV_VAR
        ))),
    }
}

/// Runtime configuration for a `PersonLookupAgent`
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub credential: Credential,

    /// Model identifier sent with every request
    pub model: String,

    /// Directory holding `person_lookup_prompt.jinja2`
    pub prompts_dir: PathBuf,

    /// Base URL of the Responses API
    pub api_base: String,

    /// HTTP client timeout; `None` waits as long as the server does
    pub timeout: Option<Duration>,

    /// Write the resolved key back into the process environment
    pub export_credential: bool,
}

impl LookupConfig {
    /// Load configuration from .env, the environment and the explicit key
    ///
    /// Environment Variables:
    /// - OPENAI_API_KEY (required unless `api_key` is given)
    /// - PERSON_LOOKUP_MODEL (optional): defaults to gpt-4o-mini
    /// - PERSON_LOOKUP_PROMPTS_DIR (optional): defaults to "prompts"
    /// - OPENAI_BASE_URL (optional): defaults to https://api.openai.com/v1
    /// - PERSON_LOOKUP_TIMEOUT_SECS (optional): HTTP timeout in seconds
    /// - PERSON_LOOKUP_EXPORT_KEY (optional): "1"/"true" re-exports the key
    ///
    /// # Errors
    /// - No API key from either source
    /// - Unparseable timeout value
    pub fn load(api_key: Option<&str>) -> Result<Self> {
        // Load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        let credential = resolve_credential(api_key)?;

        let model = non_empty_var(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let prompts_dir = non_empty_var(PROMPTS_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR));

        let api_base = non_empty_var(API_BASE_ENV_VAR)
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = match non_empty_var(TIMEOUT_ENV_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    LookupError::ConfigError(format!(
                        "{} must be a whole number of seconds, got '{}': {}",
                        TIMEOUT_ENV_VAR, raw, e
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let export_credential = non_empty_var(EXPORT_KEY_ENV_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            credential,
            model,
            prompts_dir,
            api_base,
            timeout,
            export_credential,
        })
    }

    /// Defaults for everything except the key, without touching the environment
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential,
            model: DEFAULT_MODEL.to_string(),
            prompts_dir: PathBuf::from(DEFAULT_PROMPTS_DIR),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
            export_credential: false,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Process-wide lock for tests that mutate environment variables
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
