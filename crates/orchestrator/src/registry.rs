//! Backend selection and model versions.
//!
//! This module tracks which backend is active and resolves the model version
//! used for it. At most one backend is active; selecting a new one replaces
//! the previous selection in a single assignment.

use std::fmt;

use vendor_brain::VendorKind;

use crate::error::OrchestratorError;

/// Default checkpoint for the internal toolkit.
pub const DEFAULT_TOOLKIT_MODEL: &str = "ireneli1024/bart-large-elife-finetuned";

/// A processing engine a command can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The internal biomedical toolkit.
    Toolkit,
    ChatGpt,
    Claude,
    Gemini,
    Llama,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::Toolkit,
        Backend::ChatGpt,
        Backend::Claude,
        Backend::Gemini,
        Backend::Llama,
    ];

    /// Parse a user-supplied backend name.
    ///
    /// Accepts the canonical names, a few aliases, and the numeric shortcuts
    /// `1` to `4` for the external families.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "toolkit" | "ascle" | "internal" => Some(Self::Toolkit),
            "1" | "chatgpt" | "gpt" | "openai" => Some(Self::ChatGpt),
            "2" | "claude" | "anthropic" => Some(Self::Claude),
            "3" | "gemini" | "google" => Some(Self::Gemini),
            "4" | "llama" | "meta" => Some(Self::Llama),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toolkit => "toolkit",
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Llama => "llama",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Toolkit => "Toolkit",
            Self::ChatGpt => "ChatGPT",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Llama => "LLaMA",
        }
    }

    /// The vendor family, or `None` for the internal toolkit.
    pub fn vendor(&self) -> Option<VendorKind> {
        match self {
            Self::Toolkit => None,
            Self::ChatGpt => Some(VendorKind::ChatGpt),
            Self::Claude => Some(VendorKind::Claude),
            Self::Gemini => Some(VendorKind::Gemini),
            Self::Llama => Some(VendorKind::Llama),
        }
    }

    pub fn is_external(&self) -> bool {
        self.vendor().is_some()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<VendorKind> for Backend {
    fn from(kind: VendorKind) -> Self {
        match kind {
            VendorKind::ChatGpt => Self::ChatGpt,
            VendorKind::Claude => Self::Claude,
            VendorKind::Gemini => Self::Gemini,
            VendorKind::Llama => Self::Llama,
        }
    }
}

/// Default model version per backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVersions {
    pub toolkit: String,
    pub chatgpt: String,
    pub claude: String,
    pub gemini: String,
    pub llama: String,
}

impl Default for ModelVersions {
    fn default() -> Self {
        Self {
            toolkit: DEFAULT_TOOLKIT_MODEL.to_string(),
            chatgpt: VendorKind::ChatGpt.default_model().to_string(),
            claude: VendorKind::Claude.default_model().to_string(),
            gemini: VendorKind::Gemini.default_model().to_string(),
            llama: VendorKind::Llama.default_model().to_string(),
        }
    }
}

impl ModelVersions {
    /// Default version for `backend`.
    pub fn get(&self, backend: Backend) -> &str {
        match backend {
            Backend::Toolkit => &self.toolkit,
            Backend::ChatGpt => &self.chatgpt,
            Backend::Claude => &self.claude,
            Backend::Gemini => &self.gemini,
            Backend::Llama => &self.llama,
        }
    }

    /// Create from environment variables.
    ///
    /// Environment variables:
    /// - `TOOLKIT_MODEL` - Toolkit checkpoint
    /// - `CHATGPT_MODEL` - ChatGPT model
    /// - `CLAUDE_MODEL` - Claude model
    /// - `GEMINI_MODEL` - Gemini model
    /// - `LLAMA_MODEL` - LLaMA model on the Hugging Face hub
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            toolkit: std::env::var("TOOLKIT_MODEL").unwrap_or(defaults.toolkit),
            chatgpt: std::env::var("CHATGPT_MODEL").unwrap_or(defaults.chatgpt),
            claude: std::env::var("CLAUDE_MODEL").unwrap_or(defaults.claude),
            gemini: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini),
            llama: std::env::var("LLAMA_MODEL").unwrap_or(defaults.llama),
        }
    }
}

/// The active backend and the model version to use with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub backend: Backend,
    pub version: String,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.backend, self.version)
    }
}

/// Tracks the active backend for one session.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    versions: ModelVersions,
    active: Option<Selection>,
}

impl ModelRegistry {
    /// Create a registry with nothing selected.
    pub fn new(versions: ModelVersions) -> Self {
        Self {
            versions,
            active: None,
        }
    }

    /// Select a backend by name.
    ///
    /// A blank `version` means the backend's default. On `InvalidBackend`
    /// the previous selection is left as it was.
    pub fn select(
        &mut self,
        backend_name: &str,
        version: Option<&str>,
    ) -> Result<&Selection, OrchestratorError> {
        let backend = Backend::parse(backend_name)
            .ok_or_else(|| OrchestratorError::InvalidBackend(backend_name.trim().to_string()))?;

        let version = version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.versions.get(backend))
            .to_string();

        Ok(self.active.insert(Selection { backend, version }))
    }

    /// The active selection, if any.
    pub fn get_active(&self) -> Option<&Selection> {
        self.active.as_ref()
    }

    /// Default version for a backend name.
    pub fn default_version(&self, backend_name: &str) -> Result<&str, OrchestratorError> {
        Backend::parse(backend_name)
            .map(|backend| self.versions.get(backend))
            .ok_or_else(|| OrchestratorError::InvalidBackend(backend_name.trim().to_string()))
    }

    /// The toolkit selection used when topic gating overrides the active
    /// backend: the active version if the toolkit is selected, the default
    /// otherwise.
    pub fn toolkit_selection(&self) -> Selection {
        match &self.active {
            Some(selection) if selection.backend == Backend::Toolkit => selection.clone(),
            _ => Selection {
                backend: Backend::Toolkit,
                version: self.versions.toolkit.clone(),
            },
        }
    }
}
