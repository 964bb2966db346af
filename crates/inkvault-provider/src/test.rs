//! Test summarizers for use in downstream crates.

use crate::{DiffSummary, ProviderError, ProviderResult, Summarizer};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A summarizer that always returns a fixed reply.
pub struct StaticSummarizer {
    summary: String,
    tags: Vec<String>,
    calls: AtomicUsize,
}

impl StaticSummarizer {
    pub fn new(summary: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            tags,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `summarize` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for StaticSummarizer {
    async fn summarize(&self, _old_text: &str, _new_text: &str) -> ProviderResult<DiffSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(DiffSummary {
            summary: self.summary.clone(),
            tags: self.tags.clone(),
        })
    }

    fn provider_id(&self) -> &str {
        "static"
    }
}

/// A summarizer that always fails, for exercising fallback paths.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _old_text: &str, _new_text: &str) -> ProviderResult<DiffSummary> {
        Err(ProviderError::api_error(503, "service unavailable"))
    }

    fn provider_id(&self) -> &str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_summarizer_returns_fixed_reply() {
        let summarizer = StaticSummarizer::new("rewrote the ending", vec!["ending".into()]);
        let result = summarizer.summarize("old", "new").await.unwrap();
        assert_eq!(result.summary, "rewrote the ending");
        assert_eq!(summarizer.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_summarizer_errors() {
        let summarizer = FailingSummarizer;
        assert!(summarizer.summarize("old", "new").await.is_err());
    }
}
