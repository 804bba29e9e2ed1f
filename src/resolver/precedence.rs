//! The precedence merge.
//!
//! Resolution is split in two so the expensive half can be cached:
//!
//! - [`resolve_base`] merges every source that depends only on the node and
//!   the unit of work (group graph walk, files, inline variables, external
//!   play files, play bundles). Its result is what the result cache stores.
//! - [`finish`] layers the step-scoped sources, the overrides and the
//!   reserved keys on top of a base. It is cheap and runs on every call.
//!
//! [`resolve`] runs both and is the uncached entry point.

use std::path::Path;

use log::debug;

use super::ordering::effective_groups;
use crate::cache::FileCache;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::inventory::{GroupGraph, Node};
use crate::loader::Loader;
use crate::play::{Step, UnitOfWork, VarsFileRef};
use crate::reserved::{self, RUN_DIR_KEY};
use crate::vars::{combine, Vars};

/// Everything a resolution reads besides the node, play and step.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub file_cache: &'a FileCache,
    pub graph: &'a dyn GroupGraph,
    pub loader: &'a dyn Loader,
    pub settings: &'a Settings,
}

/// Merge all sources, lowest precedence first, and add the reserved keys.
pub fn resolve(
    node: Option<&Node>,
    unit_of_work: Option<&UnitOfWork>,
    step: Option<&Step>,
    overrides: &Vars,
    ctx: &ResolveContext<'_>,
) -> Result<Vars> {
    let base = resolve_base(node, unit_of_work, ctx)?;
    Ok(finish(&base, unit_of_work, step, overrides))
}

/// Merge the sources that do not depend on the step.
///
/// Order, low to high:
/// 1. universal group file
/// 2. group files of the effective group list
/// 3. node file, then the `run_dir` default
/// 4. inline variables of the effective group list
/// 5. inline variables of the node
/// 6. inline variables of the unit of work
/// 7. external variable files of the unit of work
/// 8. `vars` of bundles attached to the unit of work
///
/// Levels 1 to 5, except `run_dir`, need a node.
pub fn resolve_base(
    node: Option<&Node>,
    unit_of_work: Option<&UnitOfWork>,
    ctx: &ResolveContext<'_>,
) -> Result<Vars> {
    debug!(
        "Resolving variables for node={:?} unit_of_work={:?}",
        node.map(|n| n.name()),
        unit_of_work.map(|u| u.name())
    );

    let mut all_vars = Vars::new();
    let universal = ctx.settings.universal_group.as_str();

    // Group and node files only apply to a node
    let groups = match node {
        Some(node) => {
            if let Some(file) = ctx.file_cache.group_file_ref(universal) {
                combine(&mut all_vars, file);
            }
            effective_groups(node, ctx.graph)?
        }
        None => Vec::new(),
    };

    for group in &groups {
        if group.name() == universal {
            continue;
        }
        if let Some(file) = ctx.file_cache.group_file_ref(group.name()) {
            combine(&mut all_vars, file);
        }
    }

    if let Some(node) = node {
        if let Some(file) = ctx.file_cache.node_file_ref(node.name()) {
            combine(&mut all_vars, file);
        }
    }

    all_vars.insert(
        RUN_DIR_KEY.to_string(),
        serde_yaml::Value::from(ctx.settings.run_dir.display().to_string()),
    );

    for group in &groups {
        combine(&mut all_vars, group.vars());
    }

    if let Some(node) = node {
        combine(&mut all_vars, node.vars());
    }

    if let Some(play) = unit_of_work {
        combine(&mut all_vars, play.vars());

        for file in play.vars_files() {
            let file_vars = load_vars_file(file, ctx.loader)?;
            combine(&mut all_vars, &file_vars);
        }

        for bundle in play.bundles() {
            combine(&mut all_vars, bundle.vars());
        }
    }

    Ok(all_vars)
}

/// Layer step-scoped sources, overrides and reserved keys over `base`.
///
/// Bundle defaults are the lowest precedence of all, so they go *under* the
/// base: a default survives only if no other source defines the key.
pub fn finish(
    base: &Vars,
    unit_of_work: Option<&UnitOfWork>,
    step: Option<&Step>,
    overrides: &Vars,
) -> Vars {
    let mut all_vars = Vars::new();

    if let Some(play) = unit_of_work {
        for bundle in play.bundles() {
            combine(&mut all_vars, bundle.defaults());
        }
    }
    if let Some(bundle) = step.and_then(|s| s.bundle()) {
        combine(&mut all_vars, bundle.defaults());
    }

    combine(&mut all_vars, base);

    if let Some(step) = step {
        if let Some(bundle) = step.bundle() {
            combine(&mut all_vars, bundle.vars());
        }
        combine(&mut all_vars, step.vars());
    }

    combine(&mut all_vars, overrides);

    reserved::inject(&mut all_vars);
    all_vars
}

/// Load one external variable file reference of a unit of work.
fn load_vars_file(file: &VarsFileRef, loader: &dyn Loader) -> Result<Vars> {
    match file {
        VarsFileRef::Path(path) => loader.load(path),
        VarsFileRef::FirstFound(candidates) => {
            let mut failures = Vec::new();
            for candidate in candidates {
                match loader.load(candidate) {
                    Ok(vars) => {
                        debug!("Using {} from first-found candidates", candidate.display());
                        return Ok(vars);
                    }
                    Err(e) => failures.push(e.to_string()),
                }
            }
            Err(Error::Load {
                path: display_candidates(candidates),
                message: if failures.is_empty() {
                    "no candidate files were listed".to_string()
                } else {
                    format!("no candidate file could be loaded: {}", failures.join("; "))
                },
            })
        }
    }
}

fn display_candidates<P: AsRef<Path>>(candidates: &[P]) -> String {
    candidates
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
