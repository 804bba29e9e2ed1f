//! Effective group list
//!
//! Builds the ordered list of groups whose variables apply to a node: every
//! direct group of the node, closed over parents, each group exactly once.
//!
//! ## Process
//!
//! 1.  **Depth-First Traversal**: Direct groups are walked in the node's
//!     declared membership order. For each group, its parents are walked first
//!     in declared parent order, then the group itself is emitted
//!     (post-order). Ancestors therefore precede their descendants and get
//!     lower precedence.
//!
//! 2.  **Visited Tracking**: A group reached again through a second path
//!     (diamond inheritance) is skipped. Its position is the one it got the
//!     first time it was reached. Names are never sorted.
//!
//! 3.  **Cycle Detection**: The current expansion path is kept on a stack. A
//!     group that is already on the stack closes a cycle, which aborts the
//!     traversal with `Error::CycleDetected` before any recursion can loop.
//!
//! For node `n` in `[web, db]`, with `web -> [common]` and
//! `db -> [common, backup]`, the order is `common, web, backup, db`.

use std::collections::HashSet;

use log::trace;

use crate::error::{Error, Result};
use crate::inventory::{Group, GroupGraph, Node};

/// Compute the effective group list for `node`, lowest precedence first.
pub fn effective_groups<'g>(node: &Node, graph: &'g dyn GroupGraph) -> Result<Vec<&'g Group>> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut path = Vec::new();

    for name in node.groups() {
        build_order_recursive(name, node.name(), graph, &mut order, &mut visited, &mut path)?;
    }

    trace!(
        "Effective groups for '{}': [{}]",
        node.name(),
        order.iter().map(|g| g.name()).collect::<Vec<_>>().join(", ")
    );
    Ok(order)
}

/// Emit `name` after all of its ancestors.
///
/// `referrer` is the node or group that named this group, for error messages.
fn build_order_recursive<'g>(
    name: &str,
    referrer: &str,
    graph: &'g dyn GroupGraph,
    order: &mut Vec<&'g Group>,
    visited: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Result<()> {
    if let Some(start) = path.iter().position(|p| p == name) {
        let mut cycle_path = path[start..].to_vec();
        cycle_path.push(name.to_string());
        return Err(Error::CycleDetected {
            cycle: cycle_path.join(" -> "),
        });
    }

    if visited.contains(name) {
        return Ok(());
    }

    let group = graph.group(name).ok_or_else(|| Error::Configuration {
        message: format!("Unknown group '{}' referenced by '{}'", name, referrer),
        hint: Some(format!("Declare group '{}' in the inventory", name)),
    })?;

    path.push(name.to_string());
    for parent in group.parents() {
        build_order_recursive(parent, name, graph, order, visited, path)?;
    }
    path.pop();

    visited.insert(name.to_string());
    order.push(group);
    Ok(())
}
