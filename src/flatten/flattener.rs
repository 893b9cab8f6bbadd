//! Record Flattener
//!
//! Turns nested records into flat rows keyed by dotted paths
//! (`user.address.city`). Rows are independent: each row carries exactly the
//! leaf paths reachable from its own record, and the union of paths across
//! the batch, in first-encounter order, becomes the table schema.

use crate::core::FlatRow;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Flatten a batch of records into path-keyed rows plus the ordered set of
/// distinct paths seen across the whole batch.
///
/// Keys that already contain `.` and empty-string keys are treated as plain
/// segments. A nested object with zero keys contributes no leaf. Non-object
/// items contribute an empty row; they are rejected upstream by
/// [`validate_batch`](super::validate_batch).
pub fn flatten_batch(records: &[Value]) -> (Vec<FlatRow>, Vec<String>) {
    let mut paths = Vec::new();
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let mut row = FlatRow::new();
        if let Value::Object(fields) = record {
            flatten_object(fields, None, &mut row, &mut paths, &mut seen);
        }
        rows.push(row);
    }

    (rows, paths)
}

fn flatten_object(
    fields: &Map<String, Value>,
    prefix: Option<&str>,
    row: &mut FlatRow,
    paths: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    for (key, value) in fields {
        let path = match prefix {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(children) => {
                flatten_object(children, Some(&path), row, paths, seen);
            }
            leaf => {
                if seen.insert(path.clone()) {
                    paths.push(path.clone());
                }
                row.insert(path, leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_objects_into_dotted_paths() {
        let records = vec![json!({"user": {"name": "Ann", "address": {"city": "Kyiv"}}})];
        let (rows, paths) = flatten_batch(&records);

        assert_eq!(paths, vec!["user.name", "user.address.city"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("user.name"), Some(&json!("Ann")));
        assert_eq!(rows[0].get("user.address.city"), Some(&json!("Kyiv")));
    }

    #[test]
    fn rows_are_independent_and_sparse() {
        let records = vec![
            json!({"user": {"name": "Ann", "age": 30}}),
            json!({"user": {"name": "Bo"}}),
        ];
        let (rows, paths) = flatten_batch(&records);

        assert_eq!(paths, vec!["user.name", "user.age"]);
        assert_eq!(rows[0].len(), 2);
        // Bo has no age; the key must not be defaulted in.
        assert_eq!(rows[1].len(), 1);
        assert!(!rows[1].contains_key("user.age"));
    }

    #[test]
    fn paths_keep_first_encounter_order_across_the_batch() {
        let records = vec![json!({"b": 1}), json!({"a": 2, "b": 3}), json!({"c": 4})];
        let (_, paths) = flatten_batch(&records);
        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[test]
    fn null_leaves_are_kept() {
        let records = vec![json!({"a": {"b": null}})];
        let (rows, paths) = flatten_batch(&records);
        assert_eq!(paths, vec!["a.b"]);
        assert_eq!(rows[0].get("a.b"), Some(&Value::Null));
    }

    #[test]
    fn empty_nested_object_contributes_no_leaf() {
        let records = vec![json!({"a": {}, "b": 1})];
        let (rows, paths) = flatten_batch(&records);
        assert_eq!(paths, vec!["b"]);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn dotted_and_empty_source_keys_are_plain_segments() {
        let records = vec![json!({"a.b": 1, "": {"x": 2}})];
        let (rows, paths) = flatten_batch(&records);
        assert_eq!(paths, vec!["a.b", ".x"]);
        assert_eq!(rows[0].get("a.b"), Some(&json!(1)));
        assert_eq!(rows[0].get(".x"), Some(&json!(2)));
    }
}
