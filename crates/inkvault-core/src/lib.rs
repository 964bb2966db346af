//! Chapter version history engine for inkvault.
//!
//! This crate implements the "time machine" behind a novel-writing app:
//! it decides when a chapter save deserves an immutable snapshot, keeps a
//! bounded per-chapter history, restores past versions safely, and produces
//! human-readable change summaries (generative when configured, local
//! statistics otherwise).
//!
//! # Example
//!
//! ```no_run
//! use inkvault_core::{ChapterService, ChapterUpdate, SnapshotFlags};
//! use inkvault_storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ChapterService::new(Arc::new(MemoryStorage::new()), None);
//!
//! let chapter = service.create_chapter("Chapter One", "It was a dark night.").await?;
//!
//! // Saves run through the snapshot policy
//! let result = service
//!     .save_chapter(
//!         &chapter.id,
//!         ChapterUpdate::default().content("It was a dark and stormy night."),
//!         SnapshotFlags::default(),
//!     )
//!     .await?;
//!
//! for version in service.list_versions(&chapter.id, None).await? {
//!     println!("{} {}", version.created_at, version.word_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod chapter;
pub mod error;
pub mod policy;
pub mod service;
pub mod summarize;
pub mod version_store;

pub use chapter::{Chapter, ChapterRepository, ChapterStatus, ChapterUpdate};
pub use error::{CoreError, CoreResult};
pub use policy::{should_snapshot, SnapshotFlags, SNAPSHOT_THRESHOLD};
pub use service::{ChapterService, DiffAnalysis, SaveResult, SnapshotOutcome};
pub use summarize::{local_summary, DiffSummarizer};
pub use version_store::{ChapterVersion, VersionStore, DEFAULT_KEEP, DEFAULT_LIST_LIMIT};
