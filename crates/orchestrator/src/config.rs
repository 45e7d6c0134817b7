//! Configuration for the command router.

use std::env;

use crate::error::OrchestratorError;
use crate::registry::ModelVersions;

/// Languages the toolkit can translate into by default.
pub const DEFAULT_SUPPORTED_LANGUAGES: &[&str] = &["French", "Spanish", "German", "Italian", "Chinese"];

/// Default translation target when a command names none.
pub const DEFAULT_LANGUAGE: &str = "French";

/// How a command picks its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingPolicy {
    /// The explicitly selected backend handles every command.
    #[default]
    ExplicitSelection,
    /// In-domain (medical) commands go to the toolkit; everything else goes
    /// to the selected backend.
    TopicGated,
}

impl RoutingPolicy {
    /// Parse `explicit` or `topic`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "explicit" | "explicit_selection" => Some(Self::ExplicitSelection),
            "topic" | "topic_gated" => Some(Self::TopicGated),
            _ => None,
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Translation target when none is named.
    pub default_language: String,
    /// Accepted translation targets.
    pub supported_languages: Vec<String>,
    /// Routing policy.
    pub policy: RoutingPolicy,
    /// How many history entries to replay into chat backends (None = all).
    pub max_context_entries: Option<usize>,
    /// Default model version per backend.
    pub versions: ModelVersions,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            supported_languages: DEFAULT_SUPPORTED_LANGUAGES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            policy: RoutingPolicy::default(),
            max_context_entries: None,
            versions: ModelVersions::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create config from environment variables.
    ///
    /// Environment variables:
    /// - `ROUTER_DEFAULT_LANGUAGE` - Default translation target (default: French)
    /// - `ROUTER_SUPPORTED_LANGUAGES` - Comma-separated translation targets
    /// - `ROUTER_POLICY` - `explicit` (default) or `topic`
    /// - `ROUTER_MAX_CONTEXT_ENTRIES` - History window for chat backends
    /// - `TOOLKIT_MODEL`, `CHATGPT_MODEL`, `CLAUDE_MODEL`, `GEMINI_MODEL` - Default versions
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let defaults = Self::default();

        let default_language = env::var("ROUTER_DEFAULT_LANGUAGE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.default_language);

        let supported_languages = env::var("ROUTER_SUPPORTED_LANGUAGES")
            .ok()
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|langs| !langs.is_empty())
            .unwrap_or(defaults.supported_languages);

        let policy = match env::var("ROUTER_POLICY") {
            Ok(value) => RoutingPolicy::parse(&value).ok_or_else(|| {
                OrchestratorError::Configuration(format!(
                    "ROUTER_POLICY must be `explicit` or `topic`, got `{}`",
                    value
                ))
            })?,
            Err(_) => defaults.policy,
        };

        let max_context_entries = match env::var("ROUTER_MAX_CONTEXT_ENTRIES") {
            Ok(value) => Some(value.trim().parse().map_err(|_| {
                OrchestratorError::Configuration(format!(
                    "ROUTER_MAX_CONTEXT_ENTRIES must be a number, got `{}`",
                    value
                ))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            default_language,
            supported_languages,
            policy,
            max_context_entries,
            versions: ModelVersions::from_env(),
        })
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }
}

/// Builder for OrchestratorConfig.
#[derive(Debug, Default)]
pub struct OrchestratorConfigBuilder {
    config: OrchestratorConfig,
}

impl OrchestratorConfigBuilder {
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.config.default_language = language.into();
        self
    }

    pub fn supported_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.supported_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn policy(mut self, policy: RoutingPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn max_context_entries(mut self, limit: usize) -> Self {
        self.config.max_context_entries = Some(limit);
        self
    }

    pub fn versions(mut self, versions: ModelVersions) -> Self {
        self.config.versions = versions;
        self
    }

    pub fn build(self) -> OrchestratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env-var tests (env is process-global)
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_router_vars() {
        for var in [
            "ROUTER_DEFAULT_LANGUAGE",
            "ROUTER_SUPPORTED_LANGUAGES",
            "ROUTER_POLICY",
            "ROUTER_MAX_CONTEXT_ENTRIES",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.default_language, "French");
        assert_eq!(config.supported_languages.len(), 5);
        assert_eq!(config.policy, RoutingPolicy::ExplicitSelection);
        assert!(config.max_context_entries.is_none());
    }

    #[test]
    fn test_builder() {
        let config = OrchestratorConfig::builder()
            .default_language("Spanish")
            .supported_languages(["Spanish", "German"])
            .policy(RoutingPolicy::TopicGated)
            .max_context_entries(6)
            .build();

        assert_eq!(config.default_language, "Spanish");
        assert_eq!(config.supported_languages, vec!["Spanish", "German"]);
        assert_eq!(config.policy, RoutingPolicy::TopicGated);
        assert_eq!(config.max_context_entries, Some(6));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(RoutingPolicy::parse("Topic"), Some(RoutingPolicy::TopicGated));
        assert_eq!(RoutingPolicy::parse("explicit"), Some(RoutingPolicy::ExplicitSelection));
        assert_eq!(RoutingPolicy::parse("both"), None);
    }

    #[test]
    fn test_from_env_scenarios() {
        let _lock = ENV_LOCK.lock().unwrap();

        // Defaults
        clear_router_vars();
        let config = OrchestratorConfig::from_env().unwrap();
        assert_eq!(config.default_language, "French");
        assert_eq!(config.policy, RoutingPolicy::ExplicitSelection);

        // Overrides
        env::set_var("ROUTER_DEFAULT_LANGUAGE", "German");
        env::set_var("ROUTER_SUPPORTED_LANGUAGES", "German, Dutch,,");
        env::set_var("ROUTER_POLICY", "topic");
        env::set_var("ROUTER_MAX_CONTEXT_ENTRIES", "10");
        let config = OrchestratorConfig::from_env().unwrap();
        assert_eq!(config.default_language, "German");
        assert_eq!(config.supported_languages, vec!["German", "Dutch"]);
        assert_eq!(config.policy, RoutingPolicy::TopicGated);
        assert_eq!(config.max_context_entries, Some(10));

        // Invalid policy
        env::set_var("ROUTER_POLICY", "both");
        match OrchestratorConfig::from_env() {
            Err(OrchestratorError::Configuration(msg)) => assert!(msg.contains("ROUTER_POLICY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Invalid window
        env::set_var("ROUTER_POLICY", "explicit");
        env::set_var("ROUTER_MAX_CONTEXT_ENTRIES", "lots");
        assert!(OrchestratorConfig::from_env().is_err());

        clear_router_vars();
    }
}
