//! Chapter records and their repository.
//!
//! The chapter is the live, mutable document under edit. The history engine
//! only ever touches `title`, `content` and the `updated_at` marker; identity
//! and the rest of the lifecycle belong to the surrounding application.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use inkvault_storage::Storage;
use inkvault_util::id::Identifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Storage key prefix for chapter records.
const CHAPTER_KEY: &str = "chapter";

/// Editorial status of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

/// A live chapter document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Character count of `content`; for CJK prose this doubles as the
    /// word count shown in the UI.
    pub word_count: usize,
    pub status: ChapterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    /// Create a new chapter with a fresh id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: Identifier::chapter(),
            title: title.into(),
            word_count: count_chars(&content),
            content,
            status: ChapterStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Typed partial update for a chapter.
///
/// Only the fields listed here are mutable through the engine; anything else
/// is rejected at the type level rather than merged into a dynamic field map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChapterUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<ChapterStatus>,
}

impl ChapterUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn status(mut self, status: ChapterStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }

    /// Apply this update to a chapter, recomputing the word count and
    /// bumping `updated_at`.
    pub fn apply(&self, chapter: &mut Chapter) {
        if let Some(title) = &self.title {
            chapter.title = title.clone();
        }
        if let Some(content) = &self.content {
            chapter.content = content.clone();
            chapter.word_count = count_chars(content);
        }
        if let Some(status) = self.status {
            chapter.status = status;
        }
        chapter.updated_at = Utc::now();
    }
}

/// Count characters the way the word counter does.
pub(crate) fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// CRUD access to chapter records.
#[derive(Clone)]
pub struct ChapterRepository {
    storage: Arc<dyn Storage>,
}

impl ChapterRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Create and persist a new chapter.
    pub async fn create(&self, title: &str, content: &str) -> CoreResult<Chapter> {
        let chapter = Chapter::new(title, content);
        inkvault_storage::write(&*self.storage, &[CHAPTER_KEY, &chapter.id], &chapter).await?;
        info!(chapter_id = %chapter.id, "created chapter");
        Ok(chapter)
    }

    /// Fetch a chapter by id.
    pub async fn get(&self, id: &str) -> CoreResult<Option<Chapter>> {
        Ok(inkvault_storage::read(&*self.storage, &[CHAPTER_KEY, id]).await?)
    }

    /// Apply a typed update to a chapter and persist the result.
    pub async fn update(&self, id: &str, update: &ChapterUpdate) -> CoreResult<Chapter> {
        let mut chapter = self
            .get(id)
            .await?
            .ok_or_else(|| CoreError::ChapterNotFound(id.to_string()))?;

        update.apply(&mut chapter);
        inkvault_storage::write(&*self.storage, &[CHAPTER_KEY, id], &chapter).await?;
        Ok(chapter)
    }

    /// List all chapters, newest-updated first.
    pub async fn list(&self) -> CoreResult<Vec<Chapter>> {
        let keys = self.storage.list(&[CHAPTER_KEY]).await?;
        let mut chapters = Vec::with_capacity(keys.len());

        for key in keys {
            let key_refs: Vec<&str> = key.iter().map(|s| s.as_str()).collect();
            if let Some(chapter) =
                inkvault_storage::read::<Chapter>(&*self.storage, &key_refs).await?
            {
                chapters.push(chapter);
            }
        }

        chapters.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chapters)
    }

    /// Delete a chapter record. Version cascade is handled by the service.
    pub async fn delete(&self, id: &str) -> CoreResult<bool> {
        if !self.storage.exists(&[CHAPTER_KEY, id]).await? {
            return Ok(false);
        }
        self.storage.remove(&[CHAPTER_KEY, id]).await?;
        info!(chapter_id = %id, "deleted chapter");
        Ok(true)
    }
}
