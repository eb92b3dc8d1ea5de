//! Where the API credential comes from.

use std::env;

use cw_core::ApiKey;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Source of the API credential, consulted once per request.
pub trait CredentialSource: Send + Sync {
    /// A usable key, or `None` when the credential is not configured.
    fn api_key(&self) -> Option<ApiKey>;
}

/// Reads the key from the process environment at call time.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<ApiKey> {
        ApiKey::parse(env::var(&self.var).ok().as_deref())
    }
}

/// Fixed credential, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticCredentials(Option<ApiKey>);

impl StaticCredentials {
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(ApiKey::parse(raw))
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<ApiKey> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_credentials_read_at_call_time() {
        let var = "CW_TEST_KEY_READ_AT_CALL_TIME";
        let source = EnvCredentials::new(var);

        env::remove_var(var);
        assert!(source.api_key().is_none());

        env::set_var(var, "undefined");
        assert!(source.api_key().is_none());

        env::set_var(var, "AIza-real");
        assert_eq!(source.api_key().map(|k| k.expose().to_string()), Some("AIza-real".to_string()));

        env::remove_var(var);
    }

    #[test]
    fn test_static_credentials() {
        assert!(StaticCredentials::new(None).api_key().is_none());
        assert!(StaticCredentials::new(Some("")).api_key().is_none());
        assert!(StaticCredentials::new(Some("k")).api_key().is_some());
    }
}
