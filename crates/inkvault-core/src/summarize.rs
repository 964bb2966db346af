//! Change summaries between two versions.
//!
//! Two-tier design: when a generative collaborator is configured, its
//! free-text summary is used verbatim; when it is missing, slow, or broken,
//! a deterministic statistical summary is produced locally. Summarization
//! therefore never fails and never blocks a caller on a hard error.

use inkvault_provider::{DiffSummary, Summarizer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces a natural-language description of a change.
#[derive(Clone)]
pub struct DiffSummarizer {
    collaborator: Option<Arc<dyn Summarizer>>,
}

impl DiffSummarizer {
    pub fn new(collaborator: Option<Arc<dyn Summarizer>>) -> Self {
        Self { collaborator }
    }

    /// Summarize the change from `old_text` to `new_text`.
    ///
    /// Infallible: any collaborator error selects the local fallback.
    pub async fn summarize(&self, old_text: &str, new_text: &str) -> DiffSummary {
        if let Some(collaborator) = &self.collaborator {
            match collaborator.summarize(old_text, new_text).await {
                Ok(summary) => {
                    debug!(provider = collaborator.provider_id(), "generative summary produced");
                    return summary;
                }
                Err(e) => {
                    warn!(
                        provider = collaborator.provider_id(),
                        error = %e,
                        "generative summary failed, using local fallback"
                    );
                }
            }
        }

        local_summary(old_text, new_text)
    }
}

/// Deterministic statistical summary: character and line deltas.
///
/// Tag strings follow the literal pattern `"<sign><N> chars"` /
/// `"<sign><N> lines"` with `+` for non-negative deltas.
pub fn local_summary(old_text: &str, new_text: &str) -> DiffSummary {
    let char_delta = new_text.chars().count() as i64 - old_text.chars().count() as i64;
    let line_delta = line_count(new_text) as i64 - line_count(old_text) as i64;

    let tags = vec![
        "local".to_string(),
        format!("{char_delta:+} chars"),
        format!("{line_delta:+} lines"),
    ];

    let direction = if char_delta >= 0 {
        "increased"
    } else {
        "decreased"
    };
    let summary = format!(
        "AI summarizer not configured; local diff stats: characters {direction} by {}, line count change {line_delta:+}.",
        char_delta.abs()
    );

    DiffSummary { summary, tags }
}

/// Count lines by simple `\r?\n` splitting; an empty text has zero lines.
fn line_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.replace("\r\n", "\n").replace('\r', "\n").split('\n').count()
}
