//! In-process caches for variable files and merged results
//!
//! - [`FileCache`] holds parsed per-node and per-group variable files. It is
//!   written during setup only, so it needs no locking.
//! - [`ResultCache`] memoizes merged mappings per (node, unit of work). It is
//!   written during execution by concurrent resolvers, behind one mutex.
//!   Two workers inserting the same key is harmless: resolution is
//!   deterministic, so both values are equal.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::vars::Vars;

/// Parsed node and group variable files, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FileCache {
    node_files: HashMap<String, Vars>,
    group_files: HashMap<String, Vars>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` and store it as the variable file of node `name`.
    ///
    /// Replaces any earlier file for the same node. On error the cache is
    /// left untouched.
    pub fn register_node_file(
        &mut self,
        name: &str,
        path: &Path,
        loader: &dyn Loader,
    ) -> Result<()> {
        let vars = loader.load(path)?;
        debug!("Registered node file {} for '{}'", path.display(), name);
        if self.node_files.insert(name.to_string(), vars).is_some() {
            warn!("Node file for '{}' replaced by {}", name, path.display());
        }
        Ok(())
    }

    /// Load `path` and store it as the variable file of group `name`.
    ///
    /// Replaces any earlier file for the same group. On error the cache is
    /// left untouched.
    pub fn register_group_file(
        &mut self,
        name: &str,
        path: &Path,
        loader: &dyn Loader,
    ) -> Result<()> {
        let vars = loader.load(path)?;
        debug!("Registered group file {} for '{}'", path.display(), name);
        if self.group_files.insert(name.to_string(), vars).is_some() {
            warn!("Group file for '{}' replaced by {}", name, path.display());
        }
        Ok(())
    }

    /// Variables from the node's file; empty when none is registered.
    pub fn node_file(&self, name: &str) -> Vars {
        self.node_files.get(name).cloned().unwrap_or_default()
    }

    /// Variables from the group's file; empty when none is registered.
    pub fn group_file(&self, name: &str) -> Vars {
        self.group_files.get(name).cloned().unwrap_or_default()
    }

    /// Borrowing lookup used by the resolver to avoid a copy.
    pub(crate) fn node_file_ref(&self, name: &str) -> Option<&Vars> {
        self.node_files.get(name)
    }

    /// Borrowing lookup used by the resolver to avoid a copy.
    pub(crate) fn group_file_ref(&self, name: &str) -> Option<&Vars> {
        self.group_files.get(name)
    }

    pub fn has_node_file(&self, name: &str) -> bool {
        self.node_files.contains_key(name)
    }

    pub fn has_group_file(&self, name: &str) -> bool {
        self.group_files.contains_key(name)
    }
}

/// Derive the node or group name from a conventional variable file path:
/// `host_vars/web1.yml` -> `web1`.
pub fn name_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Load {
            path: path.display().to_string(),
            message: "cannot derive a node or group name from this path".to_string(),
        })
}

/// Result cache key: node identity and unit-of-work identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub node: Option<String>,
    pub unit_of_work: Option<String>,
}

impl CacheKey {
    pub fn new(node: Option<&str>, unit_of_work: Option<&str>) -> Self {
        Self {
            node: node.map(str::to_string),
            unit_of_work: unit_of_work.map(str::to_string),
        }
    }
}

/// In-process cache of merged variable mappings
#[derive(Debug, Clone)]
pub struct ResultCache {
    cache: Arc<Mutex<HashMap<CacheKey, Vars>>>,
}

impl ResultCache {
    /// Create a new empty result cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a copy of the cached mapping, or compute and cache it if not present
    pub fn get_or_resolve<F>(&self, key: CacheKey, resolver: F) -> Result<Vars>
    where
        F: FnOnce() -> Result<Vars>,
    {
        if let Some(cached) = self.get(&key)? {
            debug!("Result cache hit for {:?}", key);
            return Ok(cached);
        }

        debug!("Result cache miss for {:?}", key);
        // Resolve outside the lock; concurrent misses on one key both compute.
        let result = resolver()?;
        self.put(key, result.clone())?;
        Ok(result)
    }

    /// Store a mapping, replacing any existing entry for the key
    pub fn put(&self, key: CacheKey, value: Vars) -> Result<()> {
        let mut cache = self.lock()?;
        cache.insert(key, value);
        Ok(())
    }

    /// Get a copy of a cached mapping without computing
    pub fn get(&self, key: &CacheKey) -> Result<Option<Vars>> {
        let cache = self.lock()?;
        Ok(cache.get(key).cloned())
    }

    /// Check if a key exists in cache
    pub fn contains(&self, key: &CacheKey) -> Result<bool> {
        let cache = self.lock()?;
        Ok(cache.contains_key(key))
    }

    /// Clear all cached entries
    pub fn clear(&self) -> Result<()> {
        let mut cache = self.lock()?;
        cache.clear();
        Ok(())
    }

    /// Get the number of cached entries
    pub fn len(&self) -> Result<usize> {
        let cache = self.lock()?;
        Ok(cache.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        let cache = self.lock()?;
        Ok(cache.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CacheKey, Vars>>> {
        self.cache.lock().map_err(|_| Error::LockPoisoned {
            context: "result cache".to_string(),
        })
    }
}

#[cfg(test)]
impl ResultCache {
    /// Poison the mutex by panicking while holding it.
    pub(crate) fn poison(&self) {
        let cache = Arc::clone(&self.cache);
        let _ = std::thread::spawn(move || {
            let _guard = cache.lock().unwrap();
            panic!("poisoning result cache");
        })
        .join();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
