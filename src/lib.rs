//! # Variable Precedence Engine
//!
//! This library computes the *effective variables* of an execution target:
//! a node (host), within a unit of work (play), within a step (task). It
//! merges variables drawn from group and node files, inline group, node,
//! play and task variables, play variable files, role bundles and override
//! variables according to a fixed precedence order, and caches the result.
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use vars_engine::inventory::{Group, Inventory, Node};
//! use vars_engine::loader::MemoryLoader;
//! use vars_engine::manager::VariableManager;
//!
//! let loader = MemoryLoader::new()
//!     .with_file("group_vars/all.yml", "ntp: pool.ntp.org")
//!     .with_file("host_vars/web1.yml", "http_port: 8080");
//!
//! let mut inventory = Inventory::new();
//! inventory.add_group(Group::new("webservers"));
//!
//! let mut manager = VariableManager::new(Arc::new(loader));
//! manager.set_group_graph(Arc::new(inventory)).unwrap();
//! manager.register_group_file("all", "group_vars/all.yml").unwrap();
//! manager.register_node_file_from_path("host_vars/web1.yml").unwrap();
//! manager.freeze();
//!
//! let node = Node::new("web1").with_group("webservers");
//! let vars = manager.resolve(Some(&node), None, None, true).unwrap();
//! assert_eq!(vars["ntp"].as_str(), Some("pool.ntp.org"));
//! assert_eq!(vars["http_port"].as_u64(), Some(8080));
//! ```
//!
//! ## Core Concepts
//!
//! - **Variables (`vars`)**: the `Vars` mapping type and the flat,
//!   last-write-wins `combine` used between precedence levels.
//! - **Loading (`loader`)**: the `Loader` trait that turns a path into a
//!   mapping, with a YAML-on-disk and an in-memory implementation.
//! - **Inventory (`inventory`)**: nodes, groups and the `GroupGraph` trait.
//! - **Plays (`play`)**: units of work, steps and role bundles.
//! - **Resolution (`resolver`)**: the effective group ordering and the
//!   precedence merge.
//! - **Caching (`cache`)**: the variable file cache and the result cache.
//! - **Reserved variables (`reserved`, `version`)**: `omit`, `vars`,
//!   `engine_version` and `run_dir`.
//! - **Facade (`manager`)**: `VariableManager`, which ties the above together
//!   and enforces the setup-then-execute discipline.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod inventory;
pub mod loader;
pub mod manager;
pub mod play;
pub mod reserved;
pub mod resolver;
pub mod vars;
pub mod version;

#[cfg(test)]
mod vars_proptest;
