//! Variable mappings and the flat merge used between precedence levels.
//!
//! Every source the engine reads (variable files, inline variables, overrides)
//! is reduced to a [`Vars`] mapping. Sources are combined with [`combine`],
//! which is a flat overwrite: a key in the newer source replaces the older
//! value whatever the two types are, and keys only present in the older source
//! survive unchanged. Nested mappings are *not* merged recursively.
//!
//! `Vars` is a `BTreeMap` so that iteration and serialization order depend
//! only on the keys, never on insertion history.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// A variable mapping: variable name to YAML value.
pub type Vars = BTreeMap<String, Value>;

/// Merge `source` into `target`, last write wins.
pub fn combine(target: &mut Vars, source: &Vars) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Convert a parsed YAML document into a [`Vars`] mapping.
///
/// - A mapping is converted key by key. String keys are kept, number and
///   bool keys are stringified, any other key is rejected. Two keys that
///   stringify to the same name (`1` and `"1"`) are rejected too.
/// - An empty document (`null`) is an empty mapping.
/// - Any other top-level value is rejected.
///
/// `origin` names the source for error messages.
pub fn from_yaml(origin: &str, document: Value) -> Result<Vars> {
    match document {
        Value::Null => Ok(Vars::new()),
        Value::Mapping(mapping) => {
            let mut vars = Vars::new();
            for (key, value) in mapping {
                let name = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(Error::Load {
                            path: origin.to_string(),
                            message: format!(
                                "variable names must be scalars, found {}",
                                kind(&other)
                            ),
                        });
                    }
                };
                if vars.contains_key(&name) {
                    return Err(Error::Load {
                        path: origin.to_string(),
                        message: format!("variable '{}' is defined twice", name),
                    });
                }
                vars.insert(name, value);
            }
            Ok(vars)
        }
        other => Err(Error::Load {
            path: origin.to_string(),
            message: format!("expected a mapping at the top level, found {}", kind(&other)),
        }),
    }
}

/// Build a `Vars` mapping as a YAML `Value::Mapping`.
pub fn to_yaml(vars: &Vars) -> Value {
    let mut mapping = serde_yaml::Mapping::new();
    for (key, value) in vars {
        mapping.insert(Value::String(key.clone()), value.clone());
    }
    Value::Mapping(mapping)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Vars> {
        from_yaml("test.yml", serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_combine_last_write_wins() {
        let mut target = parse("a: 1\nb: 2").unwrap();
        let source = parse("b: 3\nc: 4").unwrap();
        combine(&mut target, &source);

        assert_eq!(target["a"], Value::from(1));
        assert_eq!(target["b"], Value::from(3));
        assert_eq!(target["c"], Value::from(4));
    }

    #[test]
    fn test_combine_replaces_across_types() {
        let mut target = parse("port: {http: 80}").unwrap();
        let source = parse("port: '8080'").unwrap();
        combine(&mut target, &source);

        assert_eq!(target["port"], Value::from("8080"));
    }

    #[test]
    fn test_combine_does_not_deep_merge() {
        let mut target = parse("db: {host: a, port: 5432}").unwrap();
        let source = parse("db: {host: b}").unwrap();
        combine(&mut target, &source);

        let db = target["db"].as_mapping().unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.get("host"), Some(&Value::from("b")));
    }

    #[test]
    fn test_from_yaml_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_stringifies_scalar_keys() {
        let vars = parse("1: one\ntrue: yes").unwrap();
        assert_eq!(vars["1"], Value::from("one"));
        assert!(vars.contains_key("true"));
    }

    #[test]
    fn test_from_yaml_rejects_colliding_keys() {
        let err = parse("1: number\n'1': string").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("'1' is defined twice"));

        let err = parse("'true': string\ntrue: bool").unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_from_yaml_rejects_non_mapping() {
        let err = parse("- a\n- b").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("a sequence"));

        let err = parse("just a string").unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_from_yaml_rejects_complex_keys() {
        let err = parse("? [a, b]\n: value").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("test.yml"));
    }

    #[test]
    fn test_to_yaml_keeps_keys() {
        let vars = parse("b: 2\na: 1").unwrap();
        let value = to_yaml(&vars);
        let mapping = value.as_mapping().unwrap();
        let keys: Vec<&str> = mapping.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
