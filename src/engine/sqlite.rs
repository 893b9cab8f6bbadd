//! SQLite Query Engine
//!
//! Loads the flat table into a fresh in-memory SQLite database and runs the
//! caller's SQL against it. Nothing survives the call: the connection is
//! opened, loaded, queried, and dropped per request.
//!
//! Error classification follows the pipeline contract: failures while
//! creating or filling the table are internal faults, failures while
//! preparing or running the caller's SQL are query errors surfaced verbatim.
//!
//! Booleans are stored as 0/1 INTEGER in columns declared BOOLEAN and coerced
//! back to JSON booleans when a result column carries that declared type.

use super::inference::{ColumnType, infer_column_types};
use super::{FlatTable, QueryEngine};
use crate::core::{FlatRow, FlatSqlError, Result, TABLE_NAME};
use anyhow::anyhow;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEngine;

impl SqliteEngine {
    pub fn new() -> Self {
        Self
    }

    fn load_table(
        &self,
        conn: &Connection,
        table: &FlatTable,
        types: &[ColumnType],
    ) -> Result<()> {
        let column_defs: Vec<String> = table
            .columns
            .iter()
            .zip(types)
            .map(|(name, column_type)| match column_type.sql_decl() {
                "" => quote_ident(name),
                decl => format!("{} {}", quote_ident(name), decl),
            })
            .collect();

        let create = format!(
            "CREATE TABLE {} ({})",
            quote_ident(TABLE_NAME),
            column_defs.join(", ")
        );
        conn.execute(&create, [])
            .map_err(|e| FlatSqlError::Internal(anyhow!("failed to create table: {e}")))?;

        let quoted: Vec<String> = table.columns.iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=table.columns.len()).map(|i| format!("?{i}")).collect();
        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(TABLE_NAME),
            quoted.join(", "),
            placeholders.join(", ")
        );

        let mut stmt = conn
            .prepare(&insert)
            .map_err(|e| FlatSqlError::Internal(anyhow!("failed to prepare insert: {e}")))?;
        for row in &table.rows {
            let values = table
                .columns
                .iter()
                .map(|column| bind_value(row.get(column)))
                .collect::<Result<Vec<_>>>()?;
            stmt.execute(params_from_iter(values))
                .map_err(|e| FlatSqlError::Internal(anyhow!("failed to insert row: {e}")))?;
        }

        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "loaded flat table"
        );
        Ok(())
    }

    fn run_sql(&self, conn: &Connection, sql: &str) -> Result<Vec<FlatRow>> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| FlatSqlError::Query(e.to_string()))?;
        // Only a direct reference to a BOOLEAN-declared column carries that
        // declared type; computed columns have none and stay numeric.
        let columns: Vec<(String, bool)> = stmt
            .columns()
            .iter()
            .map(|column| {
                let boolean = column
                    .decl_type()
                    .is_some_and(|decl| decl.eq_ignore_ascii_case("BOOLEAN"));
                (column.name().to_string(), boolean)
            })
            .collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| FlatSqlError::Query(e.to_string()))?;
        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| FlatSqlError::Query(e.to_string()))?
        {
            let mut flat = FlatRow::new();
            for (index, (name, is_boolean)) in columns.iter().enumerate() {
                let value = row
                    .get_ref(index)
                    .map_err(|e| FlatSqlError::Query(e.to_string()))?;
                flat.insert(name.clone(), read_value(value, *is_boolean)?);
            }
            out.push(flat);
        }
        Ok(out)
    }
}

impl QueryEngine for SqliteEngine {
    fn execute(&self, table: &FlatTable, sql: &str) -> Result<Vec<FlatRow>> {
        if table.columns.is_empty() {
            return Err(FlatSqlError::NoColumns);
        }

        let conn = Connection::open_in_memory()
            .map_err(|e| FlatSqlError::Internal(anyhow!("failed to open in-memory database: {e}")))?;

        let types = infer_column_types(table);
        self.load_table(&conn, table, &types)?;

        self.run_sql(&conn, sql)
    }
}

/// Convert one cell for binding; absent keys bind as NULL.
///
/// Integers above `i64::MAX` are refused rather than approximated as REAL.
fn bind_value(value: Option<&Value>) -> Result<SqlValue> {
    match value {
        None | Some(Value::Null) => Ok(SqlValue::Null),
        Some(Value::Bool(b)) => Ok(SqlValue::Integer(i64::from(*b))),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if n.is_u64() {
                Err(FlatSqlError::Internal(anyhow!(
                    "integer {n} is out of range for an SQLite INTEGER"
                )))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Ok(SqlValue::Text(n.to_string()))
            }
        }
        Some(Value::String(s)) => Ok(SqlValue::Text(s.clone())),
        // Nested values are rejected upstream; direct engine callers get
        // their JSON text.
        Some(other) => Ok(SqlValue::Text(other.to_string())),
    }
}

fn read_value(value: ValueRef<'_>, is_boolean: bool) -> Result<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(i) if is_boolean => Ok(Value::Bool(i != 0)),
        ValueRef::Integer(i) => Ok(Value::from(i)),
        ValueRef::Real(f) => Ok(serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        ValueRef::Text(bytes) => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        ValueRef::Blob(_) => Err(FlatSqlError::Query(
            "BLOB columns are not supported".to_string(),
        )),
    }
}

fn quote_ident(ident: &str) -> String {
    let escaped = ident.replace('"', "\"\"");
    format!("\"{escaped}\"")
}
