//! # Engine Settings
//!
//! This module defines the settings a [`VariableManager`] is constructed with
//! and the logic for parsing them from YAML.
//!
//! ```yaml
//! run_dir: /srv/playbooks   # exposed to every resolution as `run_dir`
//! universal_group: all      # group whose file is merged first
//! cache_results: true       # memoize per (node, unit of work)
//! ```
//!
//! Every field is optional. Unknown keys are rejected so that a typo does not
//! silently fall back to a default.
//!
//! [`VariableManager`]: crate::manager::VariableManager

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

const VALID_KEYS_HINT: &str = "Valid keys are run_dir, universal_group, cache_results";

/// Settings for a variable manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Working directory of the overall run, exposed as the `run_dir`
    /// variable at low precedence.
    #[serde(default = "defaults::default_run_dir")]
    pub run_dir: PathBuf,

    /// Group whose variable file is merged before every other source.
    #[serde(default = "defaults::default_universal_group")]
    pub universal_group: String,

    /// Whether `resolve(.., use_cache = true)` stores results.
    #[serde(default = "defaults::default_cache_results")]
    pub cache_results: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_dir: defaults::default_run_dir(),
            universal_group: defaults::default_universal_group(),
            cache_results: defaults::default_cache_results(),
        }
    }
}

impl Settings {
    /// Default settings with a different run directory
    pub fn with_run_dir<P: Into<PathBuf>>(mut self, run_dir: P) -> Self {
        self.run_dir = run_dir.into();
        self
    }

    /// Check values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.universal_group.trim().is_empty() {
            return Err(Error::Configuration {
                message: "universal_group must not be empty".to_string(),
                hint: Some(format!(
                    "Omit the key to use the default group '{}'",
                    defaults::UNIVERSAL_GROUP
                )),
            });
        }
        Ok(())
    }
}

/// Parse settings from a YAML string.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(yaml_content).map_err(|e| Error::Configuration {
            message: format!("Invalid settings: {}", e),
            hint: Some(VALID_KEYS_HINT.to_string()),
        })?;
    settings.validate()?;
    Ok(settings)
}
