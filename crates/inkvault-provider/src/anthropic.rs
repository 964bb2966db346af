//! Anthropic (Claude) summarizer implementation.

use crate::config::{clean_url, SummarizerConfig};
use crate::{
    build_prompt, parse_reply, DiffSummary, ProviderError, ProviderResult, Summarizer,
    SYSTEM_PROMPT,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// The Anthropic API base URL.
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// The Anthropic API version.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Anthropic (Claude) summarizer.
pub struct AnthropicSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl AnthropicSummarizer {
    /// Create a new Anthropic summarizer from config.
    pub fn new(config: &SummarizerConfig) -> ProviderResult<Self> {
        let api_key = config.api_key.as_deref().ok_or(ProviderError::Unconfigured)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|_| ProviderError::Unconfigured)?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = clean_url(config.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL));
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        debug!(model = %model, "created Anthropic summarizer");

        Ok(Self {
            client,
            base_url,
            model,
        })
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Summarizer for AnthropicSummarizer {
    async fn summarize(&self, old_text: &str, new_text: &str) -> ProviderResult<DiffSummary> {
        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "system": SYSTEM_PROMPT,
            "messages": [{
                "role": "user",
                "content": build_prompt(old_text, new_text),
            }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(status.as_u16(), message));
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .first()
            .map(|block| block.text.as_str())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::invalid_response("empty content"));
        }

        Ok(parse_reply(text))
    }

    fn provider_id(&self) -> &str {
        "anthropic"
    }
}
