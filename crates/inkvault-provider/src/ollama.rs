//! Ollama (local model) summarizer implementation.

use crate::config::{clean_url, SummarizerConfig};
use crate::{
    build_prompt, parse_reply, DiffSummary, ProviderError, ProviderResult, Summarizer,
    SYSTEM_PROMPT,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Default Ollama endpoint.
const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Ollama summarizer, for locally hosted models.
pub struct OllamaSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizer {
    /// Create a new Ollama summarizer from config.
    pub fn new(config: &SummarizerConfig) -> ProviderResult<Self> {
        let model = config.model.clone().ok_or(ProviderError::Unconfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = clean_url(config.base_url.as_deref().unwrap_or(OLLAMA_URL));

        debug!(model = %model, base_url = %base_url, "created Ollama summarizer");

        Ok(Self {
            client,
            base_url,
            model,
        })
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, old_text: &str, new_text: &str) -> ProviderResult<DiffSummary> {
        let body = json!({
            "model": self.model,
            "stream": false,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(old_text, new_text) },
            ],
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(status.as_u16(), message));
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed.message.map(|m| m.content).unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::invalid_response("empty message content"));
        }

        Ok(parse_reply(&text))
    }

    fn provider_id(&self) -> &str {
        "ollama"
    }
}
