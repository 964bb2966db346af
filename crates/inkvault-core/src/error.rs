//! Error types for the core crate.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Chapter not found.
    #[error("chapter not found: {0}")]
    ChapterNotFound(String),

    /// Version not found.
    #[error("version not found: {0}")]
    VersionNotFound(String),

    /// Version exists but belongs to a different chapter.
    #[error("version {version_id} does not belong to chapter {chapter_id}")]
    VersionMismatch {
        version_id: String,
        chapter_id: String,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] inkvault_storage::StorageError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
