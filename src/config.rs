//! Environment configuration.
//!
//! The only configurable input to this crate is the AI provider credential.
//! It is recognized as present or absent; validation happens implicitly at
//! the provider, which answers misconfigured keys with its own error
//! message.

use std::env;

/// Environment variable holding the AI provider API key.
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Present only when a non-blank key is configured.
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Read configuration from the process environment. A blank key counts
    /// as absent.
    pub fn from_env() -> Self {
        let gemini_api_key = env::var(GEMINI_API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self { gemini_api_key }
    }

    /// Configuration with an explicit key, for embedding applications that
    /// manage credentials themselves.
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: Some(key.into()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env var mutations cannot race each other under
    // the parallel test runner.
    #[test]
    fn test_from_env_presence() {
        env::set_var(GEMINI_API_KEY_VAR, "test-key");
        assert_eq!(Config::from_env().gemini_api_key.as_deref(), Some("test-key"));

        env::set_var(GEMINI_API_KEY_VAR, "   ");
        assert!(!Config::from_env().has_credential());

        env::remove_var(GEMINI_API_KEY_VAR);
        assert!(!Config::from_env().has_credential());
    }

    #[test]
    fn test_with_api_key() {
        let config = Config::with_api_key("abc");
        assert!(config.has_credential());
    }
}
