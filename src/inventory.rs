//! Nodes, groups and the group graph consumed by the resolver.
//!
//! Inventory parsing lives outside this crate. What the resolver needs is a
//! read-only view: for a node, its inline variables and direct group
//! memberships; for a group, its inline variables and declared parents.
//! Groups refer to each other by name and are looked up through the
//! [`GroupGraph`] trait, so a graph may contain diamonds (and, if the caller
//! built it wrong, cycles, which the resolver rejects).
//!
//! [`Inventory`] is a simple in-memory implementation of the graph that also
//! stores nodes.

use std::collections::HashMap;

use crate::vars::Vars;

/// A single managed target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    name: String,
    vars: Vars,
    groups: Vec<String>,
}

impl Node {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the node's inline variables
    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    /// Append a direct group membership. Order of calls is declaration order.
    pub fn with_group<S: Into<String>>(mut self, group: S) -> Self {
        self.add_group(group);
        self
    }

    pub fn add_group<S: Into<String>>(&mut self, group: S) {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
    }

    pub fn set_var<S: Into<String>>(&mut self, key: S, value: serde_yaml::Value) {
        self.vars.insert(key.into(), value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Direct group memberships in declared order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

/// A named collection of nodes with optional parent groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    name: String,
    vars: Vars,
    parents: Vec<String>,
}

impl Group {
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

    /// Append a parent group. Order of calls is declaration order.
    pub fn with_parent<S: Into<String>>(mut self, parent: S) -> Self {
        self.add_parent(parent);
        self
    }

    pub fn add_parent<S: Into<String>>(&mut self, parent: S) {
        let parent = parent.into();
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    pub fn set_var<S: Into<String>>(&mut self, key: S, value: serde_yaml::Value) {
        self.vars.insert(key.into(), value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Direct parent groups in declared order
    pub fn parents(&self) -> &[String] {
        &self.parents
    }
}

/// Read-only access to groups by name.
pub trait GroupGraph: Send + Sync {
    /// Look up a group. `None` means the graph does not know the name.
    fn group(&self, name: &str) -> Option<&Group>;
}

/// In-memory inventory of nodes and groups.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    groups: HashMap<String, Group>,
    nodes: HashMap<String, Node>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a group
    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.name().to_string(), group);
    }

    /// Add or replace a node
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.name().to_string(), node);
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// All nodes, sorted by name
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.name().cmp(b.name()));
        nodes
    }
}

impl GroupGraph for Inventory {
    fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }
}
