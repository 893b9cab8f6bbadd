use serde_json::{Map, Value};

/// One tabular row: column identifier (or dotted path, before the mapping
/// step renames keys) to primitive JSON value. Built on `serde_json::Map`
/// with `preserve_order` so key order follows document order.
pub type FlatRow = Map<String, Value>;

/// Name of the table every request's batch is loaded into.
pub const TABLE_NAME: &str = "data";
