//! Shared test utilities for integration tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let (loader, manager) = manager_with(&[("host_vars/web1.yml", "foo: bar")]);
//! ```

use std::sync::Arc;

use vars_engine::loader::{parse_vars, MemoryLoader};
use vars_engine::manager::VariableManager;
use vars_engine::reserved::{OMIT_KEY, VARS_KEY, VERSION_KEY};
use vars_engine::vars::Vars;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use serde_yaml::Value;
    pub use std::sync::Arc;
    pub use vars_engine::error::Error;
    pub use vars_engine::inventory::{Group, Inventory, Node};
    pub use vars_engine::loader::MemoryLoader;
    pub use vars_engine::manager::VariableManager;
    pub use vars_engine::play::{RoleBundle, Step, UnitOfWork, VarsFileRef};
    pub use vars_engine::vars::Vars;

    #[allow(unused_imports)]
    pub use super::{manager_with, strip_reserved, vars};
}

/// Parse inline YAML into a variable mapping.
pub fn vars(yaml: &str) -> Vars {
    parse_vars("inline", yaml).expect("test YAML must be a mapping")
}

/// Build a manager over an in-memory loader holding `files`.
///
/// The loader is returned as well so tests can inspect its call counter.
#[allow(dead_code)]
pub fn manager_with(files: &[(&str, &str)]) -> (Arc<MemoryLoader>, VariableManager) {
    let mut loader = MemoryLoader::new();
    for (path, content) in files {
        loader.add_file(path, content);
    }
    let loader = Arc::new(loader);
    let manager = VariableManager::new(loader.clone());
    (loader, manager)
}

/// Drop the unconditional reserved keys, leaving merged sources and `run_dir`.
#[allow(dead_code)]
pub fn strip_reserved(mut all_vars: Vars) -> Vars {
    for key in [OMIT_KEY, VARS_KEY, VERSION_KEY] {
        all_vars.remove(key);
    }
    all_vars
}
