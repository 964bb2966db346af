//! The chapter history service: the operation surface exposed to the UI and
//! automation layers.
//!
//! Every save runs through the snapshot policy; restores are coordinated
//! here so the pre-restore state can never be lost silently. Snapshot and
//! prune failures degrade the history feature but never fail the chapter
//! write that triggered them — the live chapter is the source of truth.

use crate::chapter::{Chapter, ChapterRepository, ChapterUpdate};
use crate::error::{CoreError, CoreResult};
use crate::policy::{should_snapshot, SnapshotFlags};
use crate::summarize::DiffSummarizer;
use crate::version_store::{ChapterVersion, VersionStore, DEFAULT_KEEP};
use inkvault_diff::{diff_lines, DiffOp};
use inkvault_provider::Summarizer;
use inkvault_storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

/// How far back the timeline is scanned when resolving "the previous
/// version" for a diff.
const PREVIOUS_LOOKUP_WINDOW: usize = 200;

/// What happened to the snapshot side-channel of a save.
///
/// Explicit so tests and callers can assert on it without parsing logs.
#[derive(Debug, Clone)]
pub enum SnapshotOutcome {
    /// A version was recorded.
    Captured(ChapterVersion),
    /// The policy decided not to snapshot.
    Skipped,
    /// Capture was attempted and failed; the save itself still succeeded.
    Failed(String),
}

impl SnapshotOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, SnapshotOutcome::Captured(_))
    }
}

/// Result of a save: the updated chapter plus the snapshot side-channel.
#[derive(Debug, Clone)]
pub struct SaveResult {
    pub chapter: Chapter,
    pub snapshot: SnapshotOutcome,
}

/// A computed diff between two versions, with its summary.
#[derive(Debug, Clone)]
pub struct DiffAnalysis {
    pub ops: Vec<DiffOp>,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Chapter CRUD plus the version history ("time machine") workflows.
#[derive(Clone)]
pub struct ChapterService {
    chapters: ChapterRepository,
    versions: VersionStore,
    summarizer: DiffSummarizer,
}

impl ChapterService {
    /// Build a service over an explicit storage handle and an optional
    /// generative collaborator.
    pub fn new(storage: Arc<dyn Storage>, collaborator: Option<Arc<dyn Summarizer>>) -> Self {
        Self {
            chapters: ChapterRepository::new(storage.clone()),
            versions: VersionStore::new(storage),
            summarizer: DiffSummarizer::new(collaborator),
        }
    }

    /// Access to the underlying version store (for history tooling).
    pub fn versions(&self) -> &VersionStore {
        &self.versions
    }

    /// Access to the chapter repository.
    pub fn chapters(&self) -> &ChapterRepository {
        &self.chapters
    }

    /// Create a new chapter.
    pub async fn create_chapter(&self, title: &str, content: &str) -> CoreResult<Chapter> {
        self.chapters.create(title, content).await
    }

    /// Fetch a chapter or fail with `ChapterNotFound`.
    pub async fn get_chapter(&self, chapter_id: &str) -> CoreResult<Chapter> {
        self.chapters
            .get(chapter_id)
            .await?
            .ok_or_else(|| CoreError::ChapterNotFound(chapter_id.to_string()))
    }

    /// Delete a chapter and cascade to its versions.
    pub async fn delete_chapter(&self, chapter_id: &str) -> CoreResult<bool> {
        let existed = self.chapters.delete(chapter_id).await?;
        if existed {
            self.versions.delete_for_chapter(chapter_id).await?;
        }
        Ok(existed)
    }

    /// Save a chapter and let the snapshot policy decide whether the
    /// just-saved state also becomes a version.
    ///
    /// The save succeeds or fails on the chapter write alone. Capture and
    /// prune failures are recorded in the returned `SnapshotOutcome` and
    /// logged, never raised.
    pub async fn save_chapter(
        &self,
        chapter_id: &str,
        update: ChapterUpdate,
        flags: SnapshotFlags,
    ) -> CoreResult<SaveResult> {
        let previous = self.get_chapter(chapter_id).await?;
        let chapter = self.chapters.update(chapter_id, &update).await?;

        // With no content in the update the delta is zero; only `force`
        // can trigger a snapshot then.
        let next_content = update.content.as_deref().unwrap_or(&previous.content);
        let snapshot = if should_snapshot(&previous.content, next_content, flags) {
            self.capture_and_prune(&chapter).await
        } else {
            SnapshotOutcome::Skipped
        };

        Ok(SaveResult { chapter, snapshot })
    }

    /// Force-capture the chapter's current state as a new version.
    pub async fn create_snapshot(&self, chapter_id: &str) -> CoreResult<ChapterVersion> {
        let chapter = self.get_chapter(chapter_id).await?;
        let version = self.versions.capture(&chapter).await?;

        if let Err(e) = self.versions.prune(chapter_id, DEFAULT_KEEP).await {
            warn!(chapter_id = %chapter_id, error = %e, "prune after snapshot failed");
        }

        Ok(version)
    }

    /// List a chapter's versions, newest first.
    pub async fn list_versions(
        &self,
        chapter_id: &str,
        limit: Option<usize>,
    ) -> CoreResult<Vec<ChapterVersion>> {
        self.versions.list_by_chapter(chapter_id, limit).await
    }

    /// Restore a chapter to a past version.
    ///
    /// The version must exist and belong to the requested chapter. The
    /// restored state is written through the normal save path with `force`
    /// set, so it is immediately captured as a new version and the
    /// pre-restore state stays recoverable. All-or-nothing: if the chapter
    /// write fails, no version is created.
    pub async fn restore_version(
        &self,
        chapter_id: &str,
        version_id: &str,
    ) -> CoreResult<SaveResult> {
        let version = self
            .versions
            .get(version_id)
            .await?
            .ok_or_else(|| CoreError::VersionNotFound(version_id.to_string()))?;

        if version.chapter_id != chapter_id {
            return Err(CoreError::VersionMismatch {
                version_id: version_id.to_string(),
                chapter_id: chapter_id.to_string(),
            });
        }

        info!(chapter_id = %chapter_id, version_id = %version_id, "restoring chapter to version");

        let update = ChapterUpdate::default()
            .title(version.title.clone())
            .content(version.content.clone());
        self.save_chapter(chapter_id, update, SnapshotFlags::force())
            .await
    }

    /// Diff a version against its predecessor and summarize the change.
    ///
    /// When `previous_version_id` is omitted, the next-older entry in the
    /// version timeline is used; a version with no predecessor is diffed
    /// against empty text. The summary is persisted onto the newer version.
    pub async fn diff_versions(
        &self,
        version_id: &str,
        previous_version_id: Option<&str>,
    ) -> CoreResult<DiffAnalysis> {
        let current = self
            .versions
            .get(version_id)
            .await?
            .ok_or_else(|| CoreError::VersionNotFound(version_id.to_string()))?;

        let previous_content = match previous_version_id {
            Some(prev_id) => self
                .versions
                .get(prev_id)
                .await?
                .map(|v| v.content)
                .unwrap_or_default(),
            None => self
                .find_previous(&current)
                .await?
                .map(|v| v.content)
                .unwrap_or_default(),
        };

        let ops = diff_lines(&previous_content, &current.content);
        let summary = self
            .summarizer
            .summarize(&previous_content, &current.content)
            .await;

        self.versions
            .attach_summary(version_id, &summary.summary, &summary.tags)
            .await?;

        Ok(DiffAnalysis {
            ops,
            summary: summary.summary,
            tags: summary.tags,
        })
    }

    /// Find the version immediately older than `current` in its timeline.
    async fn find_previous(&self, current: &ChapterVersion) -> CoreResult<Option<ChapterVersion>> {
        let timeline = self
            .versions
            .list_by_chapter(&current.chapter_id, Some(PREVIOUS_LOOKUP_WINDOW))
            .await?;

        let position = timeline.iter().position(|v| v.id == current.id);
        Ok(position.and_then(|idx| timeline.into_iter().nth(idx + 1)))
    }

    /// Capture the chapter as a version and prune, swallowing failures into
    /// the outcome.
    async fn capture_and_prune(&self, chapter: &Chapter) -> SnapshotOutcome {
        match self.versions.capture(chapter).await {
            Ok(version) => {
                if let Err(e) = self.versions.prune(&chapter.id, DEFAULT_KEEP).await {
                    warn!(chapter_id = %chapter.id, error = %e, "prune after capture failed");
                }
                SnapshotOutcome::Captured(version)
            }
            Err(e) => {
                warn!(chapter_id = %chapter.id, error = %e, "snapshot failed, save continues");
                SnapshotOutcome::Failed(e.to_string())
            }
        }
    }
}
