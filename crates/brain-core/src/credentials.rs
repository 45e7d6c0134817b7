//! API credential lookup.

use std::collections::HashMap;
use std::env;

/// Source of API secrets, keyed by backend name.
///
/// Only backend construction consults this; the routing core never does.
pub trait CredentialStore: Send + Sync {
    /// Secret for `backend_name`, or `None` if not configured.
    fn get(&self, backend_name: &str) -> Option<String>;
}

/// Reads `<NAME>_API_KEY` from the process environment.
///
/// `EnvCredentials.get("chatgpt")` looks up `CHATGPT_API_KEY`. Empty values
/// count as absent.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Environment variable holding the key for a backend.
    pub fn var_name(backend_name: &str) -> String {
        format!("{}_API_KEY", backend_name.trim().to_uppercase())
    }
}

impl CredentialStore for EnvCredentials {
    fn get(&self, backend_name: &str) -> Option<String> {
        env::var(Self::var_name(backend_name))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Fixed in-memory credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key for a backend (names are case-insensitive).
    pub fn with(mut self, backend_name: &str, key: impl Into<String>) -> Self {
        self.keys.insert(backend_name.to_lowercase(), key.into());
        self
    }
}

impl CredentialStore for StaticCredentials {
    fn get(&self, backend_name: &str) -> Option<String> {
        self.keys.get(&backend_name.to_lowercase()).cloned()
    }
}
