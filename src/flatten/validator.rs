//! Batch Structure Validator
//!
//! Rejects input the flattener cannot represent as table cells: list values
//! anywhere in the tree, and top-level items that are not objects. The walk
//! is fail-fast; the first violation aborts the whole batch.

use crate::core::{FlatSqlError, Result};
use serde_json::{Map, Value};

/// Validate a batch of records before flattening.
///
/// Accepts empty objects, nulls, and arbitrarily deep nesting of non-list
/// values. Fails with the location of the first offending node, rendered as
/// `data[i].a.b`.
pub fn validate_batch(records: &[Value]) -> Result<()> {
    if records.is_empty() {
        return Err(FlatSqlError::EmptyData);
    }

    for (index, record) in records.iter().enumerate() {
        let location = format!("data[{index}]");
        match record {
            Value::Object(fields) => validate_object(fields, &location)?,
            _ => return Err(FlatSqlError::NotAnObject(location)),
        }
    }

    Ok(())
}

fn validate_object(fields: &Map<String, Value>, location: &str) -> Result<()> {
    for (key, value) in fields {
        match value {
            Value::Array(_) => {
                return Err(FlatSqlError::ListValue(format!("{location}.{key}")));
            }
            Value::Object(children) => {
                validate_object(children, &format!("{location}.{key}"))?;
            }
            _ => {}
        }
    }
    Ok(())
}
