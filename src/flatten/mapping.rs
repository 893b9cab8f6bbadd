//! Path-to-Column Mapping
//!
//! Maps dotted paths to SQL-safe column identifiers and keeps the inverse
//! association for restoring nesting after a query. Built fresh per request;
//! never shared across requests.

use crate::core::{FlatRow, FlatSqlError, Result};
use std::collections::HashMap;

/// Render a dotted path as a SQL-safe column identifier: every `.` becomes
/// `_`, and `[` / `]` are dropped. Nothing else is touched (case, leading
/// digits, and reserved words are the caller's concern).
///
/// Idempotent: sanitizing an already-sanitized identifier is a no-op.
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .filter_map(|c| match c {
            '.' => Some('_'),
            '[' | ']' => None,
            other => Some(other),
        })
        .collect()
}

/// Bidirectional path/column association for one request.
///
/// Construction applies [`sanitize_path`] to every path once, preserving
/// order. Two distinct paths sanitizing to the same identifier (`a.b` and
/// `a_b`) would silently shadow each other in the flat table, so the build
/// fails fast on collision instead.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: Vec<String>,
    path_to_column: HashMap<String, String>,
    column_to_path: HashMap<String, String>,
}

impl ColumnMapping {
    pub fn build(paths: &[String]) -> Result<Self> {
        let mut columns = Vec::with_capacity(paths.len());
        let mut path_to_column = HashMap::with_capacity(paths.len());
        let mut column_to_path: HashMap<String, String> = HashMap::with_capacity(paths.len());

        for path in paths {
            let column = sanitize_path(path);
            if let Some(existing) = column_to_path.get(&column) {
                return Err(FlatSqlError::ColumnCollision {
                    first: existing.clone(),
                    second: path.clone(),
                    column,
                });
            }
            columns.push(column.clone());
            path_to_column.insert(path.clone(), column.clone());
            column_to_path.insert(column, path.clone());
        }

        Ok(Self {
            columns,
            path_to_column,
            column_to_path,
        })
    }

    /// Column identifiers in first-encounter path order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_for(&self, path: &str) -> Option<&str> {
        self.path_to_column.get(path).map(String::as_str)
    }

    pub fn path_for(&self, column: &str) -> Option<&str> {
        self.column_to_path.get(column).map(String::as_str)
    }

    /// Re-key a path-keyed row into a column-keyed row.
    pub fn rekey_row(&self, row: FlatRow) -> FlatRow {
        row.into_iter()
            .map(|(path, value)| {
                let column = match self.path_to_column.get(&path) {
                    Some(column) => column.clone(),
                    None => sanitize_path(&path),
                };
                (column, value)
            })
            .collect()
    }
}
