//! # Variable File Loading
//!
//! The engine never reads files itself. It asks a [`Loader`] to turn a path
//! into a [`Vars`] mapping and fails with [`Error::Load`] when the loader
//! cannot produce one. This keeps the precedence logic independent of file
//! formats and of where content actually lives.
//!
//! Two implementations are provided:
//!
//! - **`YamlFileLoader`**: reads YAML files from disk, resolving relative
//!   paths against a base directory.
//! - **`MemoryLoader`**: serves YAML text staged in memory and counts how
//!   many times `load` was called. Useful in tests and for callers that
//!   assemble variable content programmatically.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::vars::{self, Vars};

/// Trait for loading variable files - allows swapping the backing store
pub trait Loader: Send + Sync {
    /// Load the file at `path` and return its top-level mapping.
    fn load(&self, path: &Path) -> Result<Vars>;
}

/// Parse YAML text into a variable mapping.
pub fn parse_vars(origin: &str, content: &str) -> Result<Vars> {
    let document: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| Error::Load {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
    vars::from_yaml(origin, document)
}

/// Loads YAML variable files from the host filesystem.
#[derive(Debug, Clone)]
pub struct YamlFileLoader {
    base_dir: PathBuf,
}

impl YamlFileLoader {
    /// Create a loader that resolves relative paths against `base_dir`.
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Loader for YamlFileLoader {
    fn load(&self, path: &Path) -> Result<Vars> {
        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        let content = std::fs::read_to_string(&full_path).map_err(|e| Error::Load {
            path: full_path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_vars(&full_path.display().to_string(), &content)
    }
}

/// In-memory loader backed by a path -> YAML text map.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
    calls: AtomicUsize,
}

impl MemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the YAML text served for `path`
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.to_string());
    }

    /// Builder-style variant of [`MemoryLoader::add_file`]
    pub fn with_file<P: AsRef<Path>>(mut self, path: P, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    /// Number of `load` calls made so far, successful or not
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Loader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<Vars> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = self.files.get(path).ok_or_else(|| Error::Load {
            path: path.display().to_string(),
            message: "file not found".to_string(),
        })?;
        parse_vars(&path.display().to_string(), content)
    }
}
