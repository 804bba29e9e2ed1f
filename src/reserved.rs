//! Reserved variables added to every resolution.
//!
//! After all sources are merged, three keys are set unconditionally:
//!
//! - [`OMIT_KEY`]: the [`Omit`] sentinel, meaning "parameter intentionally
//!   not supplied".
//! - [`VERSION_KEY`]: the engine version descriptor.
//! - [`VARS_KEY`]: a snapshot of the whole merged mapping, so templated values
//!   can refer to every current variable at once.
//!
//! [`RUN_DIR_KEY`] is also reserved but is a low-precedence default, not an
//! unconditional overwrite; the resolver places it with the node file.

use std::sync::OnceLock;

use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::Value;

use crate::vars::{self, Vars};
use crate::version;

pub const OMIT_KEY: &str = "omit";
pub const VERSION_KEY: &str = "engine_version";
pub const VARS_KEY: &str = "vars";
pub const RUN_DIR_KEY: &str = "run_dir";

const OMIT_TAG: &str = "omit";
const OMIT_PREFIX: &str = "__omit_place_holder__";

/// The "intentionally omitted" sentinel.
///
/// Its value form is a tagged YAML value carrying a token generated once per
/// process, so it never compares equal to a null, an empty string, or any
/// value read from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Omit;

impl Omit {
    /// The per-process token carried by the sentinel
    pub fn token() -> &'static str {
        static TOKEN: OnceLock<String> = OnceLock::new();
        TOKEN.get_or_init(|| format!("{}{}", OMIT_PREFIX, uuid::Uuid::new_v4().simple()))
    }

    /// The sentinel as a YAML value
    pub fn value() -> Value {
        Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(OMIT_TAG),
            value: Value::String(Self::token().to_string()),
        }))
    }

    /// True only for the sentinel produced by this process
    pub fn is_omit(value: &Value) -> bool {
        match value {
            Value::Tagged(tagged) => {
                tagged.tag == OMIT_TAG
                    && tagged.value.as_str() == Some(Self::token())
            }
            _ => false,
        }
    }
}

/// Set the unconditional reserved keys on a merged mapping.
pub fn inject(all_vars: &mut Vars) {
    all_vars.insert(OMIT_KEY.to_string(), Omit::value());
    all_vars.insert(VERSION_KEY.to_string(), version::engine_descriptor());

    all_vars.remove(VARS_KEY);
    let snapshot = vars::to_yaml(all_vars);
    all_vars.insert(VARS_KEY.to_string(), snapshot);
}
