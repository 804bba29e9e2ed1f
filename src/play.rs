//! Units of work (plays), steps (tasks) and role bundles.
//!
//! These carry the play-side variable sources. They are built by the
//! surrounding orchestrator and only read by the resolver.

use std::path::PathBuf;
use std::sync::Arc;

use crate::vars::Vars;

/// A reusable bundle of variables attached to a play or owning a task.
///
/// `defaults` are the lowest-precedence variables of all. `vars` sit above
/// the play's external variable files and below task variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleBundle {
    name: String,
    vars: Vars,
    defaults: Vars,
}

impl RoleBundle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_defaults(mut self, defaults: Vars) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn defaults(&self) -> &Vars {
        &self.defaults
    }
}

/// A reference to an external variable file listed by a play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarsFileRef {
    /// A single file. It must load.
    Path(PathBuf),
    /// Candidate files tried in order; the first one that loads is used.
    FirstFound(Vec<PathBuf>),
}

impl From<&str> for VarsFileRef {
    fn from(path: &str) -> Self {
        VarsFileRef::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for VarsFileRef {
    fn from(path: PathBuf) -> Self {
        VarsFileRef::Path(path)
    }
}

/// A scoped batch of steps targeting a set of nodes.
///
/// `name` is the identity used by the result cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitOfWork {
    name: String,
    vars: Vars,
    vars_files: Vec<VarsFileRef>,
    bundles: Vec<Arc<RoleBundle>>,
}

impl UnitOfWork {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_vars_file<F: Into<VarsFileRef>>(mut self, file: F) -> Self {
        self.vars_files.push(file.into());
        self
    }

    pub fn with_bundle(mut self, bundle: Arc<RoleBundle>) -> Self {
        self.bundles.push(bundle);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// External variable files in declared order
    pub fn vars_files(&self) -> &[VarsFileRef] {
        &self.vars_files
    }

    /// Attached bundles in attachment order
    pub fn bundles(&self) -> &[Arc<RoleBundle>] {
        &self.bundles
    }
}

/// A single action within a unit of work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    name: String,
    vars: Vars,
    bundle: Option<Arc<RoleBundle>>,
}

impl Step {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_bundle(mut self, bundle: Arc<RoleBundle>) -> Self {
        self.bundle = Some(bundle);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// The bundle this step belongs to, if any
    pub fn bundle(&self) -> Option<&Arc<RoleBundle>> {
        self.bundle.as_ref()
    }
}
