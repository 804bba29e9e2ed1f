//! Benchmarks for variable resolution.
//!
//! These benchmarks measure resolving a node's variables through group
//! hierarchies of increasing depth, with and without the result cache.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vars_engine::inventory::{Group, Inventory, Node};
use vars_engine::loader::{parse_vars, MemoryLoader};
use vars_engine::manager::VariableManager;
use vars_engine::play::{Step, UnitOfWork};

/// Build a manager whose node sits below `depth` levels of groups, each level
/// holding two groups that share the level above (a stack of diamonds).
fn diamond_stack(depth: usize) -> (VariableManager, Node) {
    let mut inventory = Inventory::new();
    let mut loader = MemoryLoader::new();

    inventory.add_group(Group::new("level0"));
    for level in 1..=depth {
        let parent = if level == 1 {
            "level0".to_string()
        } else {
            format!("level{}_join", level - 1)
        };
        for side in ["a", "b"] {
            let name = format!("level{}_{}", level, side);
            let vars = parse_vars(&name, &format!("k{}: {}\nshared: {}", level, side, name))
                .expect("valid vars");
            inventory.add_group(Group::new(name.clone()).with_parent(parent.clone()).with_vars(vars));
            loader.add_file(format!("group_vars/{}.yml", name), &format!("file_{}: {}", level, side));
        }
        inventory.add_group(
            Group::new(format!("level{}_join", level))
                .with_parent(format!("level{}_a", level))
                .with_parent(format!("level{}_b", level)),
        );
    }
    loader.add_file("vars/site.yml", "site: bench\nretries: 3");

    let group_names: Vec<String> = (1..=depth)
        .flat_map(|level| [format!("level{}_a", level), format!("level{}_b", level)])
        .collect();

    let mut manager = VariableManager::new(Arc::new(loader));
    manager.set_group_graph(Arc::new(inventory)).expect("setup");
    for name in &group_names {
        manager
            .register_group_file(name, format!("group_vars/{}.yml", name))
            .expect("setup");
    }
    manager.freeze();

    let node = Node::new("bench-host").with_group(format!("level{}_join", depth));
    (manager, node)
}

fn bench_resolve(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("resolve");
    let play = UnitOfWork::new("site").with_vars_file("vars/site.yml");
    let step = Step::new("task");

    for depth in [1, 4, 16] {
        let (manager, node) = diamond_stack(depth);

        group.bench_with_input(BenchmarkId::new("uncached", depth), &depth, |b, _| {
            b.iter(|| {
                manager
                    .resolve(Some(black_box(&node)), Some(&play), Some(&step), false)
                    .expect("resolve")
            })
        });

        group.bench_with_input(BenchmarkId::new("cached", depth), &depth, |b, _| {
            b.iter(|| {
                manager
                    .resolve(Some(black_box(&node)), Some(&play), Some(&step), true)
                    .expect("resolve")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
