//! SQL Statement Validation
//!
//! Parses the caller's SQL before it reaches the engine and rejects anything
//! that is not a single SELECT. The table lives only for the duration of one
//! request, so data-modifying statements could never do useful work; refusing
//! them up front gives a clear error instead of a confusing empty result.

use crate::core::{FlatSqlError, Result};
use sqlparser::ast::Statement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryValidator;

impl QueryValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check that `sql` is exactly one SELECT statement.
    pub fn validate(&self, sql: &str) -> Result<()> {
        if sql.trim().is_empty() {
            return Err(FlatSqlError::EmptySql);
        }

        let statements = Parser::parse_sql(&SQLiteDialect {}, sql)
            .map_err(|e| FlatSqlError::Query(format!("invalid SQL: {e}")))?;

        match statements.as_slice() {
            [Statement::Query(_)] => Ok(()),
            [_] => Err(FlatSqlError::Query(
                "only SELECT statements are allowed".to_string(),
            )),
            other => Err(FlatSqlError::Query(format!(
                "expected exactly one SQL statement, found {}",
                other.len()
            ))),
        }
    }
}
