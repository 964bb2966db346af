//! Immutable chapter versions and their store.
//!
//! Versions live in a flat keyspace (`["version", <id>]`) and carry their
//! owning chapter id, mirroring how the snapshot directory is laid out on
//! disk. Ordering comes from `created_at` alone; position in the
//! newest-first timeline is what "previous version" means.

use crate::chapter::{count_chars, Chapter};
use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use inkvault_storage::Storage;
use inkvault_util::id::Identifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Storage key prefix for version records.
const VERSION_KEY: &str = "version";

/// Retention window: versions kept per chapter after a prune.
pub const DEFAULT_KEEP: usize = 50;

/// Default cap for timeline listings.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// An immutable point-in-time copy of a chapter.
///
/// `title`, `content` and `created_at` are write-once; the only mutation a
/// version ever sees is `attach_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterVersion {
    pub id: String,
    pub chapter_id: String,
    pub title: String,
    pub content: String,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl ChapterVersion {
    /// Copy a chapter's current state into a new version.
    pub fn from_chapter(chapter: &Chapter) -> Self {
        Self {
            id: Identifier::version(),
            chapter_id: chapter.id.clone(),
            title: chapter.title.clone(),
            content: chapter.content.clone(),
            word_count: count_chars(&chapter.content),
            summary: None,
            tags: None,
            created_at: Utc::now(),
        }
    }
}

/// Persistence for chapter versions.
#[derive(Clone)]
pub struct VersionStore {
    storage: Arc<dyn Storage>,
}

impl VersionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Record the chapter's current state as a new immutable version.
    ///
    /// Never mutates the chapter and never prunes; the calling workflow is
    /// responsible for pruning afterwards so the two stay independently
    /// testable.
    pub async fn capture(&self, chapter: &Chapter) -> CoreResult<ChapterVersion> {
        let version = ChapterVersion::from_chapter(chapter);
        inkvault_storage::write(&*self.storage, &[VERSION_KEY, &version.id], &version).await?;
        info!(
            chapter_id = %chapter.id,
            version_id = %version.id,
            word_count = version.word_count,
            "captured chapter version"
        );
        Ok(version)
    }

    /// Fetch a version by id.
    pub async fn get(&self, version_id: &str) -> CoreResult<Option<ChapterVersion>> {
        Ok(inkvault_storage::read(&*self.storage, &[VERSION_KEY, version_id]).await?)
    }

    /// List a chapter's versions, newest first, capped at `limit`.
    pub async fn list_by_chapter(
        &self,
        chapter_id: &str,
        limit: Option<usize>,
    ) -> CoreResult<Vec<ChapterVersion>> {
        let mut versions = self.load_all_for_chapter(chapter_id).await?;
        versions.truncate(limit.unwrap_or(DEFAULT_LIST_LIMIT));
        Ok(versions)
    }

    /// Delete every version of `chapter_id` except the `keep` most recent.
    ///
    /// Idempotent: pruning an already-compliant timeline deletes nothing.
    /// Individual delete failures are logged and skipped; retention is a
    /// soft guarantee.
    pub async fn prune(&self, chapter_id: &str, keep: usize) -> CoreResult<u32> {
        let versions = self.load_all_for_chapter(chapter_id).await?;

        let mut deleted = 0;
        for version in versions.iter().skip(keep) {
            match self.storage.remove(&[VERSION_KEY, &version.id]).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    warn!(version_id = %version.id, error = %e, "failed to prune version");
                }
            }
        }

        if deleted > 0 {
            info!(chapter_id = %chapter_id, deleted, keep, "pruned version history");
        }
        Ok(deleted)
    }

    /// Attach a summary and tags to an existing version.
    ///
    /// This is the only permitted mutation of a version.
    pub async fn attach_summary(
        &self,
        version_id: &str,
        summary: &str,
        tags: &[String],
    ) -> CoreResult<ChapterVersion> {
        let mut version = self
            .get(version_id)
            .await?
            .ok_or_else(|| CoreError::VersionNotFound(version_id.to_string()))?;

        version.summary = Some(summary.to_string());
        version.tags = Some(tags.to_vec());
        inkvault_storage::write(&*self.storage, &[VERSION_KEY, version_id], &version).await?;
        Ok(version)
    }

    /// Delete all versions belonging to a chapter (referential cascade).
    pub async fn delete_for_chapter(&self, chapter_id: &str) -> CoreResult<u32> {
        let versions = self.load_all_for_chapter(chapter_id).await?;
        let mut deleted = 0;
        for version in &versions {
            self.storage.remove(&[VERSION_KEY, &version.id]).await?;
            deleted += 1;
        }
        if deleted > 0 {
            info!(chapter_id = %chapter_id, deleted, "cascade-deleted versions");
        }
        Ok(deleted)
    }

    /// Load all versions for a chapter, newest first.
    ///
    /// Ties on `created_at` fall back to id order so the ordering stays
    /// deterministic.
    async fn load_all_for_chapter(&self, chapter_id: &str) -> CoreResult<Vec<ChapterVersion>> {
        let keys = self.storage.list(&[VERSION_KEY]).await?;
        let mut versions = Vec::new();

        for key in keys {
            let key_refs: Vec<&str> = key.iter().map(|s| s.as_str()).collect();
            match inkvault_storage::read::<ChapterVersion>(&*self.storage, &key_refs).await {
                Ok(Some(version)) if version.chapter_id == chapter_id => versions.push(version),
                Ok(_) => {}
                Err(e) => {
                    warn!(key = key.join("/"), error = %e, "skipping unreadable version record");
                }
            }
        }

        versions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(versions)
    }
}
