//! Row Unflattener
//!
//! Rebuilds nested objects from column-keyed result rows using the inverse
//! mapping built earlier in the same request. This is a best-effort inverse:
//! a column the query synthesized (an aggregate, an aliased expression) has
//! no mapping entry, so its identifier is used verbatim as the path.

use crate::core::FlatRow;
use super::mapping::ColumnMapping;
use serde_json::{Map, Value};

/// Restore nesting for every result row.
pub fn unflatten_rows(rows: Vec<FlatRow>, mapping: &ColumnMapping) -> Vec<Value> {
    rows.into_iter()
        .map(|row| unflatten_row(row, mapping))
        .collect()
}

/// Restore nesting for one row: resolve each column back to its dotted path
/// (or fall back to the identifier itself), then walk/create intermediate
/// objects and assign the value at the final segment.
pub fn unflatten_row(row: FlatRow, mapping: &ColumnMapping) -> Value {
    let mut root = Map::new();
    for (column, value) in row {
        match mapping.path_for(&column) {
            Some(path) => insert_path(&mut root, path, value),
            None => insert_path(&mut root, &column, value),
        }
    }
    Value::Object(root)
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            // A synthesized column already claimed this segment as a leaf;
            // last writer wins.
            *slot = Value::Object(Map::new());
        }
        let Value::Object(children) = slot else {
            return;
        };
        current = children;
    }
    current.insert((*leaf).to_string(), value);
}
