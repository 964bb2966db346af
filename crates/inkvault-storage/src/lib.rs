//! Storage layer for inkvault.
//!
//! This crate provides the key-value persistence boundary the version
//! history engine is written against. Two backends are included:
//! - JSON file storage (default)
//! - In-memory storage (for testing)
//!
//! The engine never talks to a database directly; it holds an explicit
//! `Arc<dyn Storage>` handle, so tests can run against isolated in-memory
//! instances.

pub mod error;
pub mod json;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use json::JsonStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// A trait for key-value storage backends.
///
/// Keys are path segments, e.g. `["chapter", "cha_01hq..."]` for a chapter
/// record or `["version", "ver_01hq..."]` for a chapter version. Values are
/// serialized as JSON.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a value from storage.
    ///
    /// Returns `None` if the key doesn't exist.
    async fn read_raw(&self, key: &[&str]) -> StorageResult<Option<String>>;

    /// Write a raw JSON value to storage, creating parents as needed.
    async fn write_raw(&self, key: &[&str], json: &str) -> StorageResult<()>;

    /// Remove a value from storage. Removing a missing key is a no-op.
    async fn remove(&self, key: &[&str]) -> StorageResult<()>;

    /// List all direct child keys under a prefix, in lexicographic order.
    ///
    /// Returns the full key path for each item.
    async fn list(&self, prefix: &[&str]) -> StorageResult<Vec<Vec<String>>>;

    /// Check if a key exists.
    async fn exists(&self, key: &[&str]) -> StorageResult<bool>;
}

/// Typed helpers over the raw byte-level trait methods.
///
/// These are free functions rather than default trait methods so that
/// `Storage` stays object-safe (`Arc<dyn Storage>` is the handle the engine
/// passes around).
pub async fn read<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &[&str],
) -> StorageResult<Option<T>> {
    match storage.read_raw(key).await? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize a value to JSON and write it at `key`.
pub async fn write<T: Serialize>(
    storage: &dyn Storage,
    key: &[&str],
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    storage.write_raw(key, &json).await
}
