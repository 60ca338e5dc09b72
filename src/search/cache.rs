//! LRU cache over parsed search shards
//!
//! A generated index spreads tokens across dozens of shard files and a
//! viewer only ever touches a few of them per query. The cache keeps
//! recently used shards parsed and evicts the rest.

use super::shard::SearchShard;
use crate::error::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(n) => n,
    None => unreachable!(),
};

/// Cache of parsed shards keyed by file path
pub struct ShardCache {
    inner: Mutex<LruCache<PathBuf, Arc<SearchShard>>>,
}

impl ShardCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        ShardCache {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get a shard, reading and parsing the file on a cache miss
    ///
    /// Parsing is lenient; only an unreadable file is an error.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<SearchShard>> {
        let mut cache = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(shard) = cache.get(path) {
            return Ok(Arc::clone(shard));
        }

        log::debug!("loading search shard {}", path.display());
        let bytes = std::fs::read(path)?;
        let shard = Arc::new(SearchShard::parse(&bytes));
        cache.put(path.to_path_buf(), Arc::clone(&shard));
        Ok(shard)
    }

    /// Number of shards currently cached
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached shards
    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for ShardCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}
