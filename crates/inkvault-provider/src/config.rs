//! Summarizer configuration.
//!
//! Config is loaded from a JSON file in the data directory, with environment
//! variables as a fallback. An absent or incomplete config is not an error:
//! it just means the local fallback summarizer will be used.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Which provider backs the summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    Ollama,
}

/// Summarizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Anthropic,
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SummarizerConfig {
    /// Load config from a JSON file, falling back to environment variables.
    ///
    /// A malformed file is logged and treated as absent rather than failing
    /// startup; summarization then degrades to the local fallback.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<SummarizerConfig>(&content) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded summarizer config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid summarizer config, ignoring");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read summarizer config");
            }
        }

        Self::from_env()
    }

    /// Build a config from environment variables alone.
    ///
    /// `INKVAULT_API_KEY` selects Anthropic; `INKVAULT_OLLAMA_MODEL` selects
    /// Ollama. With neither set the config is unconfigured.
    pub fn from_env() -> Self {
        if let Ok(key) = std::env::var("INKVAULT_API_KEY") {
            if !key.trim().is_empty() {
                return Self {
                    provider: ProviderKind::Anthropic,
                    api_key: Some(key),
                    base_url: std::env::var("INKVAULT_BASE_URL").ok(),
                    model: std::env::var("INKVAULT_MODEL").ok(),
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                };
            }
        }

        if let Ok(model) = std::env::var("INKVAULT_OLLAMA_MODEL") {
            if !model.trim().is_empty() {
                return Self {
                    provider: ProviderKind::Ollama,
                    api_key: None,
                    base_url: std::env::var("INKVAULT_BASE_URL").ok(),
                    model: Some(model),
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                };
            }
        }

        Self::default()
    }

    /// Whether this config is complete enough to call a provider.
    pub fn is_available(&self) -> bool {
        match self.provider {
            ProviderKind::Anthropic => self
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty()),
            ProviderKind::Ollama => self.model.as_deref().is_some_and(|m| !m.trim().is_empty()),
        }
    }
}

/// Strip trailing slashes from a base URL.
pub(crate) fn clean_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
