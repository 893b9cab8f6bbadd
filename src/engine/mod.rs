//! Query Executor
//!
//! The relational collaborator behind the flattening engine: takes a flat
//! table plus a SQL string and returns flat result rows. The default
//! implementation loads an in-memory SQLite database per call.
//!
//! # Architecture
//!
//! - `inference.rs` - most-general column type profile over the flat rows
//! - `sqlite.rs` - rusqlite-backed [`QueryEngine`]

mod inference;
mod sqlite;

pub use inference::{ColumnType, infer_column_types};
pub use sqlite::SqliteEngine;

use crate::core::{FlatRow, Result};

/// A flat table ready to be loaded into the relational store: the ordered
/// column list is the batch-wide schema; keys absent on a given row are NULL
/// in that row's slot.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    pub fn new(columns: Vec<String>, rows: Vec<FlatRow>) -> Self {
        Self { columns, rows }
    }
}

/// Relational collaborator contract.
///
/// Implementations infer a schema from the rows, run the caller's SQL
/// against it, and signal malformed SQL as a query error distinct from
/// internal faults.
pub trait QueryEngine: Send + Sync {
    fn execute(&self, table: &FlatTable, sql: &str) -> Result<Vec<FlatRow>>;
}
