//! # Engine Version Descriptor
//!
//! Every resolution carries an `engine_version` variable describing the
//! version of this crate, so templated values can branch on it. The
//! descriptor is a mapping:
//!
//! ```yaml
//! string: "0.4.0"
//! full: "0.4.0"
//! major: 0
//! minor: 4
//! revision: 0
//! ```
//!
//! `string` drops any pre-release or build suffix; `full` keeps it.

use semver::Version;
use serde_yaml::{Mapping, Value};

/// The version this crate was built as
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the version descriptor mapping for `version`.
///
/// Falls back to a descriptor with only `string` and `full` set when
/// `version` is not valid semver.
pub fn descriptor(version: &str) -> Value {
    let mut mapping = Mapping::new();
    match Version::parse(version) {
        Ok(parsed) => {
            let short = format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch);
            mapping.insert("string".into(), Value::from(short));
            mapping.insert("full".into(), Value::from(parsed.to_string()));
            mapping.insert("major".into(), Value::from(parsed.major));
            mapping.insert("minor".into(), Value::from(parsed.minor));
            mapping.insert("revision".into(), Value::from(parsed.patch));
        }
        Err(_) => {
            mapping.insert("string".into(), Value::from(version));
            mapping.insert("full".into(), Value::from(version));
        }
    }
    Value::Mapping(mapping)
}

/// Descriptor for this crate's own version
pub fn engine_descriptor() -> Value {
    descriptor(ENGINE_VERSION)
}
