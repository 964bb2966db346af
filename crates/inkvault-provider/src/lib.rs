//! Generative diff-summary providers for inkvault.
//!
//! This crate wraps the external text-generation services that can describe
//! the change between two chapter versions in natural language:
//! - Anthropic (Claude)
//! - Ollama (local models)
//!
//! Providers are optional collaborators. Callers must treat every error here
//! as "use the local fallback instead" — nothing in this crate is on the
//! critical path of saving or restoring a chapter.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod ollama;
pub mod test;

pub use anthropic::AnthropicSummarizer;
pub use config::{ProviderKind, SummarizerConfig};
pub use error::{ProviderError, ProviderResult};
pub use ollama::OllamaSummarizer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Cap on how much of each text is sent to a provider.
const MAX_PROMPT_CHARS: usize = 8_000;

/// A natural-language description of a change between two versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub summary: String,
    pub tags: Vec<String>,
}

/// A service that can summarize the change between two texts.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the transformation from `old_text` to `new_text`.
    async fn summarize(&self, old_text: &str, new_text: &str) -> ProviderResult<DiffSummary>;

    /// Provider id for logging (e.g. "anthropic", "ollama").
    fn provider_id(&self) -> &str;
}

/// Build a summarizer from config, or `None` when unconfigured.
pub fn from_config(config: &SummarizerConfig) -> Option<Arc<dyn Summarizer>> {
    if !config.is_available() {
        debug!("no summarizer configured, using local fallback");
        return None;
    }

    match config.provider {
        ProviderKind::Anthropic => AnthropicSummarizer::new(config)
            .ok()
            .map(|s| Arc::new(s) as Arc<dyn Summarizer>),
        ProviderKind::Ollama => OllamaSummarizer::new(config)
            .ok()
            .map(|s| Arc::new(s) as Arc<dyn Summarizer>),
    }
}

/// System prompt shared by all providers.
pub(crate) const SYSTEM_PROMPT: &str = "You are an editor comparing two drafts of a novel chapter. \
Reply with a single JSON object: {\"summary\": \"<one or two sentences describing what changed>\", \
\"tags\": [\"<up to five short tags>\"]}. Reply with the JSON object only.";

/// Build the user prompt holding both texts.
pub(crate) fn build_prompt(old_text: &str, new_text: &str) -> String {
    format!(
        "Previous draft:\n---\n{}\n---\n\nCurrent draft:\n---\n{}\n---",
        truncate(old_text),
        truncate(new_text)
    )
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parse a provider reply into a `DiffSummary`.
///
/// Models sometimes wrap the JSON in prose or code fences, so we take the
/// outermost braces. A reply with no parseable JSON is still accepted as a
/// plain-text summary.
pub(crate) fn parse_reply(reply: &str) -> DiffSummary {
    #[derive(Deserialize)]
    struct Reply {
        summary: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<Reply>(&reply[start..=end]) {
                return DiffSummary {
                    summary: parsed.summary,
                    tags: parsed.tags,
                };
            }
        }
    }

    DiffSummary {
        summary: reply.trim().to_string(),
        tags: vec!["ai".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reply_accepts_plain_json() {
        let parsed = parse_reply(r#"{"summary": "Tightened the opening.", "tags": ["pacing"]}"#);
        assert_eq!(parsed.summary, "Tightened the opening.");
        assert_eq!(parsed.tags, vec!["pacing"]);
    }

    #[test]
    fn parse_reply_unwraps_fenced_json() {
        let parsed = parse_reply("Here you go:\n```json\n{\"summary\": \"x\", \"tags\": []}\n```");
        assert_eq!(parsed.summary, "x");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn parse_reply_falls_back_to_plain_text() {
        let parsed = parse_reply("The dialogue was rewritten.");
        assert_eq!(parsed.summary, "The dialogue was rewritten.");
        assert_eq!(parsed.tags, vec!["ai"]);
    }

    #[test]
    fn prompt_truncates_long_texts() {
        let long = "x".repeat(MAX_PROMPT_CHARS * 2);
        let prompt = build_prompt(&long, "short");
        assert!(prompt.len() < MAX_PROMPT_CHARS + 200);
    }

    #[test]
    fn from_config_returns_none_when_unconfigured() {
        assert!(from_config(&SummarizerConfig::default()).is_none());
    }

    #[test]
    fn from_config_builds_anthropic() {
        let config = SummarizerConfig {
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        let summarizer = from_config(&config).unwrap();
        assert_eq!(summarizer.provider_id(), "anthropic");
    }

    #[test]
    fn from_config_builds_ollama() {
        let config = SummarizerConfig {
            provider: ProviderKind::Ollama,
            model: Some("llama3.1".into()),
            ..Default::default()
        };
        let summarizer = from_config(&config).unwrap();
        assert_eq!(summarizer.provider_id(), "ollama");
    }
}
