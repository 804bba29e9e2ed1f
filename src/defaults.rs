//! Default values for engine settings.
//!
//! This module provides centralized default values used by `config::Settings`
//! and the variable manager, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the group every node implicitly belongs to. Its group file is the
/// lowest-precedence variable file.
pub const UNIVERSAL_GROUP: &str = "all";

/// Returns the default run directory exposed to resolutions as `run_dir`.
///
/// This is the relative path `.`, meaning "wherever the run was started".
/// Orchestrators normally override it with the directory of the play being
/// run.
pub fn default_run_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Returns the default universal group name.
pub fn default_universal_group() -> String {
    UNIVERSAL_GROUP.to_string()
}

/// Result caching is on unless settings turn it off.
pub fn default_cache_results() -> bool {
    true
}
