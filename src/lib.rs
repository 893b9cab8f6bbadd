// ============================================================================
// FlatSql Library
// ============================================================================

pub mod core;
pub mod engine;
pub mod flatten;
pub mod service;
pub mod sql;
pub mod web;

// Re-export main types for convenience
pub use core::{FlatRow, FlatSqlError, Result, TABLE_NAME};
pub use engine::{FlatTable, QueryEngine, SqliteEngine};
pub use service::{QueryService, SchemaDescription};
pub use sql::QueryValidator;
