//! Column Type Inference
//!
//! Derives a column type profile from the flat rows so the table can be
//! created with useful affinities. Nulls and absent keys carry no type
//! information; a column whose non-null values disagree stays untyped so
//! each value keeps its own storage class. Booleans have no storage class
//! of their own, so from an untyped column they come back as 0/1.

use super::FlatTable;
use serde_json::Value;

/// Most-general type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Boolean,
    Text,
    /// Mixed values; the column is declared without a type so SQLite keeps
    /// each value's own storage class.
    Any,
}

impl ColumnType {
    /// Type name for the CREATE TABLE declaration; empty for [`Any`].
    ///
    /// [`Any`]: ColumnType::Any
    pub fn sql_decl(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Text => "TEXT",
            ColumnType::Any => "",
        }
    }
}

/// Infer one [`ColumnType`] per table column, in column order.
///
/// A column with no non-null values anywhere defaults to [`ColumnType::Text`].
pub fn infer_column_types(table: &FlatTable) -> Vec<ColumnType> {
    table
        .columns
        .iter()
        .map(|column| {
            let mut inferred = None;
            for row in &table.rows {
                let Some(observed) = row.get(column).and_then(value_type) else {
                    continue;
                };
                inferred = Some(match inferred {
                    Some(current) => merge(current, observed),
                    None => observed,
                });
                if inferred == Some(ColumnType::Any) {
                    break;
                }
            }
            inferred.unwrap_or(ColumnType::Text)
        })
        .collect()
}

fn value_type(value: &Value) -> Option<ColumnType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ColumnType::Boolean),
        Value::Number(n) if n.is_i64() => Some(ColumnType::Integer),
        Value::Number(_) => Some(ColumnType::Real),
        Value::String(_) => Some(ColumnType::Text),
        // Nested values never come out of the flattener; direct engine
        // callers get them stored as JSON text.
        Value::Array(_) | Value::Object(_) => Some(ColumnType::Text),
    }
}

fn merge(current: ColumnType, observed: ColumnType) -> ColumnType {
    if current == observed {
        current
    } else {
        ColumnType::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FlatRow;
    use serde_json::json;

    fn table(columns: &[&str], rows: Vec<Vec<(&str, serde_json::Value)>>) -> FlatTable {
        let rows = rows
            .into_iter()
            .map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect::<FlatRow>()
            })
            .collect();
        FlatTable::new(columns.iter().map(|c| (*c).to_string()).collect(), rows)
    }

    #[test]
    fn homogeneous_columns_get_their_own_type() {
        let table = table(
            &["i", "f", "b", "s"],
            vec![
                vec![("i", json!(1)), ("f", json!(1.5)), ("b", json!(true)), ("s", json!("x"))],
                vec![("i", json!(2)), ("f", json!(2.5)), ("b", json!(false)), ("s", json!("y"))],
            ],
        );
        assert_eq!(
            infer_column_types(&table),
            vec![
                ColumnType::Integer,
                ColumnType::Real,
                ColumnType::Boolean,
                ColumnType::Text
            ]
        );
    }

    #[test]
    fn nulls_and_absent_keys_do_not_vote() {
        let table = table(
            &["a"],
            vec![
                vec![("a", json!(null))],
                vec![],
                vec![("a", json!(7))],
            ],
        );
        assert_eq!(infer_column_types(&table), vec![ColumnType::Integer]);
    }

    #[test]
    fn all_null_column_defaults_to_text() {
        let table = table(&["a"], vec![vec![("a", json!(null))]]);
        assert_eq!(infer_column_types(&table), vec![ColumnType::Text]);
    }

    #[test]
    fn disagreeing_values_make_the_column_untyped() {
        let table = table(
            &["a", "b"],
            vec![
                vec![("a", json!(1)), ("b", json!(1))],
                vec![("a", json!("x")), ("b", json!(2.5))],
            ],
        );
        assert_eq!(
            infer_column_types(&table),
            vec![ColumnType::Any, ColumnType::Any]
        );
    }

    #[test]
    fn untyped_columns_have_empty_sql_decl() {
        assert_eq!(ColumnType::Any.sql_decl(), "");
        assert_eq!(ColumnType::Integer.sql_decl(), "INTEGER");
        assert_eq!(ColumnType::Boolean.sql_decl(), "BOOLEAN");
    }
}
