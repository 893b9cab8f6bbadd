//! Query Service
//!
//! # Facade Pattern
//!
//! `QueryService` is the single entry point that ties the pipeline together:
//! validate the batch, flatten it, rename columns, run the SQL, and shape the
//! rows back into JSON. Callers never touch the individual stages.
//!
//! The engine sits behind the [`QueryEngine`] trait, so tests can swap the
//! SQLite implementation for a stub.

use crate::core::{FlatSqlError, Result};
use crate::engine::{FlatTable, QueryEngine, SqliteEngine};
use crate::flatten::{ColumnMapping, flatten_batch, unflatten_rows, validate_batch};
use crate::sql::QueryValidator;
use serde::Serialize;
use serde_json::{Map, Value};

/// What a batch looks like once flattened: the SQL column names and where
/// each one came from.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescription {
    /// Column names in first-encounter order, ready to use in SQL.
    pub columns: Vec<String>,
    /// Column name to the dotted path it was derived from.
    pub column_mapping: Map<String, Value>,
}

/// Queries batches of nested JSON records with SQL.
///
/// # Examples
///
/// ```
/// use flatsql::QueryService;
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = QueryService::new();
/// let records = vec![json!({"user": {"name": "Ann", "age": 30}})];
///
/// let rows = service.run_query(
///     &records,
///     "SELECT user_name FROM data WHERE user_age > 18",
///     false,
/// )?;
///
/// assert_eq!(rows[0]["user"]["name"], "Ann");
/// # Ok(())
/// # }
/// ```
pub struct QueryService {
    engine: Box<dyn QueryEngine>,
    validator: QueryValidator,
}

impl QueryService {
    pub fn new() -> Self {
        Self::with_engine(Box::new(SqliteEngine::new()))
    }

    pub fn with_engine(engine: Box<dyn QueryEngine>) -> Self {
        Self {
            engine,
            validator: QueryValidator::new(),
        }
    }

    /// Report the columns a batch would expose to SQL, without running any.
    pub fn describe_schema(&self, records: &[Value]) -> Result<SchemaDescription> {
        validate_batch(records)?;
        let (_, paths) = flatten_batch(records);
        let mapping = ColumnMapping::build(&paths)?;

        let mut column_mapping = Map::new();
        for column in mapping.columns() {
            if let Some(path) = mapping.path_for(column) {
                column_mapping.insert(column.clone(), Value::String(path.to_string()));
            }
        }

        Ok(SchemaDescription {
            columns: mapping.columns().to_vec(),
            column_mapping,
        })
    }

    /// Run one SELECT over a batch of records.
    ///
    /// With `flatten_columns` set, result rows keep their flat column names;
    /// otherwise each row is folded back into nested objects.
    pub fn run_query(
        &self,
        records: &[Value],
        sql: &str,
        flatten_columns: bool,
    ) -> Result<Vec<Value>> {
        validate_batch(records)?;
        self.validator.validate(sql)?;

        let (rows, paths) = flatten_batch(records);
        let mapping = ColumnMapping::build(&paths)?;
        if mapping.is_empty() {
            return Err(FlatSqlError::NoColumns);
        }

        let rows = rows.into_iter().map(|row| mapping.rekey_row(row)).collect();
        let table = FlatTable::new(mapping.columns().to_vec(), rows);
        let result = self.engine.execute(&table, sql)?;

        if flatten_columns {
            Ok(result.into_iter().map(Value::Object).collect())
        } else {
            Ok(unflatten_rows(result, &mapping))
        }
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}
