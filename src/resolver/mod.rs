//! Variable resolution: group ordering and the precedence merge.
//!
//! ## Overview
//!
//! Resolving the variables of a node, in a unit of work, for a step, merges
//! these sources from lowest to highest precedence. Each level is a flat
//! overwrite of the keys it defines:
//!
//! 0. `defaults` of bundles attached to the unit of work, then of the step's bundle
//! 1. file of the universal group (`all`), when there is a node
//! 2. files of the node's effective groups ([`ordering`])
//! 3. the node's file, then the `run_dir` default
//! 4. inline variables of the effective groups
//! 5. inline variables of the node
//! 6. inline variables of the unit of work
//! 7. external variable files of the unit of work
//! 8. `vars` of bundles attached to the unit of work, then of the step's bundle
//! 9. inline variables of the step
//! 10. override variables
//!
//! Then `omit`, `engine_version` and `vars` are set unconditionally
//! (see [`crate::reserved`]).
//!
//! Levels 1-8 for the unit of work's own bundles depend only on the node and
//! the unit of work; [`precedence::resolve_base`] computes them and the
//! result cache stores them. [`precedence::finish`] adds the rest.

pub mod ordering;
pub mod precedence;

pub use ordering::effective_groups;
pub use precedence::{finish, resolve, resolve_base, ResolveContext};
