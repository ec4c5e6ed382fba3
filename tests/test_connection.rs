//! Connection integration tests: raw SQL execution, typed deserialization
//! and DATE/DECIMAL value conversion.

use chrono::NaiveDate;
use price_tracker_sdk::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

#[test]
fn execute_returns_rows_with_params() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_update(
        "INSERT INTO stores (name, location) VALUES (?, ?)",
        &["Northmart".to_string(), "Yellowknife, NT".to_string()],
    )
    .unwrap();

    let rows = conn
        .execute("SELECT name, location FROM stores WHERE name = ?", &["Northmart".to_string()])
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Northmart");
}

#[test]
fn execute_returns_empty_for_no_matches() {
    let conn = Connection::open_in_memory().unwrap();
    let rows = conn
        .execute("SELECT * FROM stores WHERE name = ?", &["nope".to_string()])
        .unwrap();
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// execute_scalar
// ---------------------------------------------------------------------------

#[test]
fn execute_scalar_returns_single_value() {
    let conn = Connection::open_in_memory().unwrap();
    let result = conn.execute_scalar("SELECT 41 + 1", &[]).unwrap();
    assert_eq!(result.unwrap().as_i64().unwrap(), 42);
}

#[test]
fn execute_scalar_returns_none_for_empty_result() {
    let conn = Connection::open_in_memory().unwrap();
    let result = conn
        .execute_scalar("SELECT id FROM stores WHERE name = ?", &["nope".to_string()])
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Value conversion
// ---------------------------------------------------------------------------

#[test]
fn date_columns_convert_to_iso_strings() {
    let conn = Connection::open_in_memory().unwrap();
    let value = conn
        .execute_scalar("SELECT DATE '2025-07-15'", &[])
        .unwrap()
        .unwrap();
    assert_eq!(value, "2025-07-15");
}

#[test]
fn decimal_columns_convert_without_precision_loss() {
    let conn = Connection::open_in_memory().unwrap();
    let value = conn
        .execute_scalar("SELECT CAST('4.50' AS DECIMAL(12,2))", &[])
        .unwrap()
        .unwrap();
    // Exact string form, not a float approximation
    assert_eq!(value, "4.50");
}

// ---------------------------------------------------------------------------
// execute_into
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PriceCell {
    price: Decimal,
    date: NaiveDate,
}

#[test]
fn execute_into_deserializes_decimal_and_date_fields() {
    let conn = Connection::open_in_memory().unwrap();
    let cells: Vec<PriceCell> = conn
        .execute_into(
            "SELECT CAST('4.50' AS DECIMAL(12,2)) AS price, DATE '2025-07-15' AS date",
            &[],
        )
        .unwrap();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].price.to_string(), "4.50");
    assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
}

// ---------------------------------------------------------------------------
// Schema bootstrap
// ---------------------------------------------------------------------------

#[test]
fn schema_tables_exist_after_open() {
    let conn = Connection::open_in_memory().unwrap();
    for table in ["stores", "categories", "items", "prices"] {
        let rows = conn
            .execute(&format!("SELECT COUNT(*) AS cnt FROM {}", table), &[])
            .unwrap();
        assert_eq!(rows[0]["cnt"].as_i64().unwrap(), 0);
    }
}

#[test]
fn seed_defaults_is_idempotent_at_connection_level() {
    let conn = Connection::open_in_memory().unwrap();
    let first = conn.seed_defaults().unwrap();
    assert_eq!(first, 12); // 4 stores + 8 categories
    let second = conn.seed_defaults().unwrap();
    assert_eq!(second, 0);
}
