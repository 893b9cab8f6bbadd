/// SQL feature tests against the embedded engine.
///
/// These go straight to SqliteEngine with a hand-built flat table, skipping
/// validation and flattening.
/// Run with: cargo test --test engine_tests

use flatsql::{FlatRow, FlatTable, QueryEngine, SqliteEngine};
use serde_json::{Value, json};

fn row(pairs: &[(&str, Value)]) -> FlatRow {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn sales() -> FlatTable {
    FlatTable::new(
        vec!["city".to_string(), "amount".to_string()],
        vec![
            row(&[("city", json!("Oslo")), ("amount", json!(10))]),
            row(&[("city", json!("Bergen")), ("amount", json!(3))]),
            row(&[("city", json!("Oslo")), ("amount", json!(5))]),
            row(&[("city", json!("Bergen"))]),
        ],
    )
}

#[test]
fn test_group_by_with_aggregates() {
    let engine = SqliteEngine::new();

    let rows = engine
        .execute(
            &sales(),
            "SELECT city, SUM(amount) AS total FROM data GROUP BY city ORDER BY city",
        )
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("city"), Some(&json!("Bergen")));
    assert_eq!(rows[0].get("total"), Some(&json!(3)));
    assert_eq!(rows[1].get("city"), Some(&json!("Oslo")));
    assert_eq!(rows[1].get("total"), Some(&json!(15)));
}

#[test]
fn test_order_by_and_limit() {
    let engine = SqliteEngine::new();

    let rows = engine
        .execute(
            &sales(),
            "SELECT amount FROM data WHERE amount IS NOT NULL ORDER BY amount DESC LIMIT 2",
        )
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("amount"), Some(&json!(10)));
    assert_eq!(rows[1].get("amount"), Some(&json!(5)));
}

#[test]
fn test_where_on_text_columns() {
    let engine = SqliteEngine::new();

    let rows = engine
        .execute(&sales(), "SELECT COUNT(*) AS n FROM data WHERE city = 'Oslo'")
        .unwrap();

    assert_eq!(rows[0].get("n"), Some(&json!(2)));
}

#[test]
fn test_is_null_finds_sparse_rows() {
    let engine = SqliteEngine::new();

    let rows = engine
        .execute(&sales(), "SELECT city FROM data WHERE amount IS NULL")
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("city"), Some(&json!("Bergen")));
}

#[test]
fn test_avg_comes_back_as_a_float() {
    let engine = SqliteEngine::new();
    let table = FlatTable::new(
        vec!["n".to_string()],
        vec![row(&[("n", json!(1))]), row(&[("n", json!(2))])],
    );

    let rows = engine.execute(&table, "SELECT AVG(n) AS mean FROM data").unwrap();

    assert_eq!(rows[0].get("mean"), Some(&json!(1.5)));
}

#[test]
fn test_engine_works_behind_the_trait() {
    let engine: Box<dyn QueryEngine> = Box::new(SqliteEngine::new());
    let table = FlatTable::new(
        vec!["a".to_string()],
        vec![row(&[("a", json!(1))])],
    );

    let rows = engine.execute(&table, "SELECT a FROM data").unwrap();
    assert_eq!(rows[0].get("a"), Some(&json!(1)));
}
