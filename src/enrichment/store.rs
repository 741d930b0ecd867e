//! Persistent enrichment cache.
//!
//! Maps [`CacheKey`]s to [`EnrichmentRecord`]s and mirrors them in a single
//! pretty-printed JSON document. The document is read once, on first access,
//! and rewritten in full after every mutation.
//!
//! # Durability
//!
//! - A missing, empty, or unreadable file yields an empty store. Corruption is
//!   logged and the old content is dropped on the next write.
//! - `set`/`remove`/`clear` return only after the new document is on disk.
//!   Writes go to a temp file that is renamed over the target.
//!
//! # Concurrency
//!
//! The in-memory map lives behind an async mutex, which also covers the lazy
//! load so two first accesses cannot both read the file. A mutation takes the
//! write gate first, then applies and serializes a snapshot under the map lock
//! and releases the map before writing. Snapshots reach the disk in the order
//! they were taken, and readers only wait for the in-memory part.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::domain::{CacheKey, EnrichmentRecord};

type Entries = BTreeMap<CacheKey, EnrichmentRecord>;

/// File-backed key -> record cache for a single process.
pub struct EnrichmentStore {
    path: PathBuf,
    entries: Mutex<Option<Entries>>,
    write_gate: Mutex<()>,
}

impl EnrichmentStore {
    /// Create a store backed by `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
            write_gate: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing document if that hasn't happened yet.
    pub async fn load(&self) {
        let mut guard = self.entries.lock().await;
        self.ensure_loaded(&mut guard).await;
    }

    /// Cached record for `key`, if any.
    pub async fn get(&self, key: &CacheKey) -> Option<EnrichmentRecord> {
        let mut guard = self.entries.lock().await;
        self.ensure_loaded(&mut guard).await.get(key).cloned()
    }

    /// Replace the record for `key` and persist the whole store.
    ///
    /// The caller merges; this overwrites.
    pub async fn set(&self, key: CacheKey, record: EnrichmentRecord) -> Result<(), StoreError> {
        self.mutate(|entries| {
            entries.insert(key, record);
        })
        .await
    }

    /// Drop the record for `key`. Returns whether it existed.
    ///
    /// The document is only rewritten when something was removed.
    pub async fn remove(&self, key: &CacheKey) -> Result<bool, StoreError> {
        {
            let mut guard = self.entries.lock().await;
            if !self.ensure_loaded(&mut guard).await.contains_key(key) {
                return Ok(false);
            }
        }
        self.mutate(|entries| {
            entries.remove(key);
        })
        .await?;
        Ok(true)
    }

    /// Drop every record.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.mutate(BTreeMap::clear).await
    }

    /// Copy of all records, ordered by key.
    pub async fn snapshot(&self) -> BTreeMap<CacheKey, EnrichmentRecord> {
        let mut guard = self.entries.lock().await;
        self.ensure_loaded(&mut guard).await.clone()
    }

    pub async fn len(&self) -> usize {
        let mut guard = self.entries.lock().await;
        self.ensure_loaded(&mut guard).await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn ensure_loaded<'a>(&self, slot: &'a mut Option<Entries>) -> &'a mut Entries {
        if slot.is_none() {
            let path = self.path.clone();
            let entries = match tokio::task::spawn_blocking(move || read_entries(&path)).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Cache load task failed, starting empty: {}", e);
                    Entries::new()
                }
            };
            tracing::debug!(
                path = %self.path.display(),
                entries = entries.len(),
                "Loaded enrichment cache"
            );
            *slot = Some(entries);
        }
        slot.get_or_insert_with(Entries::new)
    }

    async fn mutate<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entries),
    {
        let _gate = self.write_gate.lock().await;

        let contents = {
            let mut guard = self.entries.lock().await;
            let entries = self.ensure_loaded(&mut guard).await;
            apply(entries);
            serde_json::to_string_pretty(&*entries).map_err(StoreError::Serialize)?
        };

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
            .await
            .map_err(|e| StoreError::TaskJoin(e.to_string()))??;

        tracing::debug!(path = %self.path.display(), "Saved enrichment cache");
        Ok(())
    }
}

/// Default cache file: `<user cache dir>/lastfm-lens/cache.json`.
pub fn default_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("lastfm-lens")
        .join("cache.json")
}

/// Read the document, degrading to an empty map on any problem.
fn read_entries(path: &Path) -> Entries {
    if !path.exists() {
        tracing::debug!("No cache file at {:?}, starting empty", path);
        return Entries::new();
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read cache file {:?}, starting empty: {}", path, e);
            return Entries::new();
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Entries::new();
    }

    match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cache file {:?} is corrupted, resetting cache: {}", path, e);
            Entries::new()
        }
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir(dir.to_path_buf(), e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, contents).map_err(|e| StoreError::Write(temp_path.clone(), e))?;
    fs::rename(&temp_path, path)
        .map_err(|e| StoreError::Rename(temp_path, path.to_path_buf(), e))?;
    Ok(())
}

/// Errors persisting the enrichment cache
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to create cache directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize cache: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write cache to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}
