//! Property-based tests for merging and precedence.
//!
//! These tests use proptest to generate random variable mappings and verify
//! that the merge invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use std::sync::Arc;

    use crate::inventory::Node;
    use crate::loader::MemoryLoader;
    use crate::manager::VariableManager;
    use crate::play::{Step, UnitOfWork};
    use crate::reserved::{OMIT_KEY, RUN_DIR_KEY, VARS_KEY, VERSION_KEY};
    use crate::vars::{combine, Vars};
    use proptest::prelude::*;
    use serde_yaml::Value;

    fn value_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ]
    }

    fn vars_strategy() -> impl Strategy<Value = Vars> {
        prop::collection::btree_map("[a-e]{1,2}", value_strategy(), 0..8)
    }

    fn is_reserved(key: &str) -> bool {
        [OMIT_KEY, RUN_DIR_KEY, VARS_KEY, VERSION_KEY].contains(&key)
    }

    // ============================================================================
    // combine property tests
    // ============================================================================

    proptest! {
        /// Property: every key of the newer source ends up with the newer value
        #[test]
        fn combine_newer_source_wins(older in vars_strategy(), newer in vars_strategy()) {
            let mut merged = older.clone();
            combine(&mut merged, &newer);
            for (key, value) in &newer {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }

        /// Property: keys only in the older source survive unchanged
        #[test]
        fn combine_keeps_older_only_keys(older in vars_strategy(), newer in vars_strategy()) {
            let mut merged = older.clone();
            combine(&mut merged, &newer);
            for (key, value) in &older {
                if !newer.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
            prop_assert!(merged.len() <= older.len() + newer.len());
        }

        /// Property: merging a mapping into itself changes nothing
        #[test]
        fn combine_is_idempotent(vars in vars_strategy()) {
            let mut merged = vars.clone();
            combine(&mut merged, &vars);
            prop_assert_eq!(merged, vars);
        }
    }

    // ============================================================================
    // precedence property tests
    // ============================================================================

    proptest! {
        /// Property: override variables win over every other source
        #[test]
        fn overrides_always_win(
            node_vars in vars_strategy(),
            play_vars in vars_strategy(),
            step_vars in vars_strategy(),
            overrides in vars_strategy(),
        ) {
            let mut manager = VariableManager::new(Arc::new(MemoryLoader::new()));
            manager.set_overrides(&overrides).unwrap();
            let node = Node::new("web1").with_vars(node_vars);
            let play = UnitOfWork::new("site").with_vars(play_vars);
            let step = Step::new("task").with_vars(step_vars);

            let result = manager.resolve(Some(&node), Some(&play), Some(&step), false).unwrap();
            for (key, value) in &overrides {
                if !is_reserved(key) {
                    prop_assert_eq!(result.get(key), Some(value));
                }
            }
        }

        /// Property: resolution is deterministic and the cache does not change it
        #[test]
        fn cached_resolution_equals_uncached(
            node_vars in vars_strategy(),
            play_vars in vars_strategy(),
        ) {
            let manager = VariableManager::new(Arc::new(MemoryLoader::new()));
            let node = Node::new("web1").with_vars(node_vars);
            let play = UnitOfWork::new("site").with_vars(play_vars);

            let uncached = manager.resolve(Some(&node), Some(&play), None, false).unwrap();
            let first = manager.resolve(Some(&node), Some(&play), None, true).unwrap();
            let second = manager.resolve(Some(&node), Some(&play), None, true).unwrap();
            prop_assert_eq!(&uncached, &first);
            prop_assert_eq!(&first, &second);
        }
    }
}
