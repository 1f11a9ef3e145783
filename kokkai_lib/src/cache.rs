//! On-disk page cache keyed by request identity.
//!
//! Each entry is one file named `<sha256-hex>.json` holding the decoded page
//! response verbatim. Entries never expire. A missing, unreadable or corrupt
//! entry reads as a miss.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use kokkai_api::WireParams;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::CacheError;

/// Suffix of every cache file name.
pub const CACHE_SUFFIX: &str = ".json";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-backed page cache. Built without a directory, it stores nothing and
/// every lookup misses.
#[derive(Clone, Debug, Default)]
pub struct FileCache {
    dir: Option<PathBuf>,
}

impl FileCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Creates a cache that never stores anything.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Directory entries are stored in, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Full path of the entry for `(endpoint, params)`, if caching is enabled.
    pub fn entry_path(&self, endpoint: &str, params: &WireParams) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(cache_key(endpoint, params)))
    }

    /// Returns the stored page for `(endpoint, params)`, or `None` when there
    /// is no entry or it cannot be decoded.
    pub async fn get(&self, endpoint: &str, params: &WireParams) -> Option<Value> {
        let path = self.entry_path(endpoint, params)?;
        let raw = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Ignoring undecodable cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Stores `data` for `(endpoint, params)`.
    ///
    /// The entry is written to a temporary file and renamed into place, so a
    /// concurrent reader sees either the old entry, the new one, or none.
    /// Succeeds trivially when caching is disabled.
    pub async fn put(
        &self,
        endpoint: &str,
        params: &WireParams,
        data: &Value,
    ) -> Result<(), CacheError> {
        let Some(dir) = self.dir.as_ref() else {
            return Ok(());
        };
        let key = cache_key(endpoint, params);
        let bytes = serde_json::to_vec(data)?;

        tokio::fs::create_dir_all(dir).await?;
        let tmp = dir.join(format!(
            "{}.tmp-{}-{}",
            key,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, dir.join(&key)).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// File name of the entry for `(endpoint, params)`: the SHA-256 hex digest
/// of `{"endpoint": ..., "params": {...}}` serialized with sorted keys, plus
/// [`CACHE_SUFFIX`].
pub fn cache_key(endpoint: &str, params: &WireParams) -> String {
    let mut payload = Map::new();
    payload.insert("endpoint".to_string(), Value::from(endpoint));
    payload.insert(
        "params".to_string(),
        Value::Object(
            params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
    );
    let raw = Value::Object(payload).to_string();

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{}{}", hex::encode(hasher.finalize()), CACHE_SUFFIX)
}
