//! # Variable Manager
//!
//! This module provides the `VariableManager`, the entry point callers use to
//! ask "what are the variables of this step, on this node, right now?".
//!
//! ## Lifecycle
//!
//! The manager has two phases:
//!
//! 1.  **Setup** (`&mut self`): register node and group variable files, set
//!     the group graph and the override variables. Any of these writes drops
//!     cached results.
//!
//! 2.  **Execution**: after [`VariableManager::freeze`], setup writes fail
//!     with `Error::Frozen`, and the manager can be shared between threads to
//!     resolve concurrently. Only the result cache changes from then on.
//!
//! ## Caching
//!
//! With `use_cache = true`, the part of a resolution that depends only on
//! (node, unit of work) is memoized by name. A node, group or unit of work
//! mutated after it was cached keeps returning the stale result until the
//! caller resolves with `use_cache = false` or calls `clear_cache()`.
//! Step variables, overrides and reserved keys are applied on every call, and
//! every call returns an owned copy.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::cache::{name_from_path, CacheKey, FileCache, ResultCache};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::inventory::{GroupGraph, Inventory, Node};
use crate::loader::Loader;
use crate::play::{Step, UnitOfWork};
use crate::resolver::{finish, resolve_base, ResolveContext};
use crate::vars::Vars;

/// Owns the variable file cache, the result cache and the override copy.
pub struct VariableManager {
    loader: Arc<dyn Loader>,
    graph: Arc<dyn GroupGraph>,
    settings: Settings,
    file_cache: FileCache,
    results: ResultCache,
    overrides: Vars,
    frozen: bool,
}

impl VariableManager {
    /// Create a manager with default settings and an empty group graph.
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            loader,
            graph: Arc::new(Inventory::new()),
            settings: Settings::default(),
            file_cache: FileCache::new(),
            results: ResultCache::new(),
            overrides: Vars::new(),
            frozen: false,
        }
    }

    /// Create a manager with explicit settings.
    pub fn with_settings(loader: Arc<dyn Loader>, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let mut manager = Self::new(loader);
        manager.settings = settings;
        Ok(manager)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the group graph node memberships are resolved against.
    pub fn set_group_graph(&mut self, graph: Arc<dyn GroupGraph>) -> Result<()> {
        self.ensure_writable("set group graph")?;
        self.graph = graph;
        self.invalidate()?;
        Ok(())
    }

    /// Load `path` as the variable file of node `name`.
    pub fn register_node_file<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<()> {
        self.ensure_writable("register node file")?;
        self.file_cache
            .register_node_file(name, path.as_ref(), self.loader.as_ref())?;
        self.invalidate()?;
        Ok(())
    }

    /// Load `path` as the variable file of group `name`.
    pub fn register_group_file<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<()> {
        self.ensure_writable("register group file")?;
        self.file_cache
            .register_group_file(name, path.as_ref(), self.loader.as_ref())?;
        self.invalidate()?;
        Ok(())
    }

    /// Register a node file named after its file stem; returns the node name.
    pub fn register_node_file_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let name = name_from_path(path.as_ref())?;
        self.register_node_file(&name, path)?;
        Ok(name)
    }

    /// Register a group file named after its file stem; returns the group name.
    pub fn register_group_file_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let name = name_from_path(path.as_ref())?;
        self.register_group_file(&name, path)?;
        Ok(name)
    }

    /// Registered variables of a node's file (empty if none)
    pub fn node_file(&self, name: &str) -> Vars {
        self.file_cache.node_file(name)
    }

    /// Registered variables of a group's file (empty if none)
    pub fn group_file(&self, name: &str) -> Vars {
        self.file_cache.group_file(name)
    }

    /// Replace the override variables with a copy of `overrides`.
    pub fn set_overrides(&mut self, overrides: &Vars) -> Result<()> {
        self.ensure_writable("set override variables")?;
        self.overrides = overrides.clone();
        Ok(())
    }

    pub fn overrides(&self) -> &Vars {
        &self.overrides
    }

    /// End the setup phase. Idempotent.
    pub fn freeze(&mut self) {
        if !self.frozen {
            debug!("Variable manager frozen");
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Resolve the variables visible to `step`, on `node`, in `unit_of_work`.
    ///
    /// Every argument is optional; a missing one contributes nothing.
    pub fn resolve(
        &self,
        node: Option<&Node>,
        unit_of_work: Option<&UnitOfWork>,
        step: Option<&Step>,
        use_cache: bool,
    ) -> Result<Vars> {
        let ctx = self.context();

        let base = if use_cache && self.settings.cache_results {
            let key = CacheKey::new(node.map(Node::name), unit_of_work.map(UnitOfWork::name));
            self.results
                .get_or_resolve(key, || resolve_base(node, unit_of_work, &ctx))?
        } else {
            resolve_base(node, unit_of_work, &ctx)?
        };

        Ok(finish(&base, unit_of_work, step, &self.overrides))
    }

    /// Resolve many nodes in parallel, one task per node.
    ///
    /// The manager must be frozen. Fails with the first error encountered.
    pub fn resolve_all(
        &self,
        nodes: &[&Node],
        unit_of_work: Option<&UnitOfWork>,
        step: Option<&Step>,
        use_cache: bool,
    ) -> Result<BTreeMap<String, Vars>> {
        if !self.frozen {
            return Err(Error::NotFrozen {
                operation: "resolve nodes in parallel".to_string(),
            });
        }

        nodes
            .par_iter()
            .map(|&node| {
                self.resolve(Some(node), unit_of_work, step, use_cache)
                    .map(|vars| (node.name().to_string(), vars))
            })
            .collect()
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) -> Result<()> {
        self.results.clear()
    }

    /// Number of cached (node, unit of work) results
    pub fn cached_results(&self) -> Result<usize> {
        self.results.len()
    }

    fn context(&self) -> ResolveContext<'_> {
        ResolveContext {
            file_cache: &self.file_cache,
            graph: self.graph.as_ref(),
            loader: self.loader.as_ref(),
            settings: &self.settings,
        }
    }

    fn ensure_writable(&self, operation: &str) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Setup writes change what a resolution would return.
    fn invalidate(&self) -> Result<()> {
        self.results.clear()
    }
}
