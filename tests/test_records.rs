//! Tests for raw-row validation: malformed rows must fail loudly with
//! their position, never be skipped.

use std::collections::HashMap;

use price_tracker_sdk::{PriceRecord, TrackerError};
use serde_json::{json, Value};

fn row(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn good_row() -> HashMap<String, Value> {
    row(&[
        ("id", json!(1)),
        ("item_id", json!(10)),
        ("item_name", json!("Milk")),
        ("category_name", json!("Dairy")),
        ("unit", json!("litre")),
        ("store_id", json!(20)),
        ("store_name", json!("Northmart")),
        ("price", json!("4.50")),
        ("date", json!("2025-07-15")),
        ("notes", Value::Null),
    ])
}

#[test]
fn from_rows_accepts_well_formed_rows() {
    let records = PriceRecord::from_rows(vec![good_row(), good_row()]).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].item_name, "Milk");
    assert_eq!(records[0].price.to_string(), "4.50");
    assert!(records[0].notes.is_none());
}

#[test]
fn from_rows_accepts_numeric_price() {
    let mut r = good_row();
    r.insert("price".into(), json!(4.5));
    let records = PriceRecord::from_rows(vec![r]).unwrap();
    assert_eq!(records[0].price, rust_decimal_macros::dec!(4.5));
}

#[test]
fn from_rows_reports_position_of_missing_price() {
    let mut bad = good_row();
    bad.remove("price");
    let err = PriceRecord::from_rows(vec![good_row(), bad, good_row()]).unwrap_err();
    match err {
        TrackerError::MalformedRecord { index, field } => {
            assert_eq!(index, 1);
            assert_eq!(field, "price");
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn from_rows_rejects_null_date() {
    let mut bad = good_row();
    bad.insert("date".into(), Value::Null);
    let err = PriceRecord::from_rows(vec![bad]).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::MalformedRecord { index: 0, field: "date" }
    ));
}

#[test]
fn from_rows_rejects_unparseable_date() {
    let mut bad = good_row();
    bad.insert("date".into(), json!("not-a-date"));
    let err = PriceRecord::from_rows(vec![bad]).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::MalformedRecord { field: "date", .. }
    ));
}

#[test]
fn from_rows_rejects_negative_price() {
    let mut bad = good_row();
    bad.insert("price".into(), json!("-1.00"));
    let err = PriceRecord::from_rows(vec![bad]).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::MalformedRecord { field: "price", .. }
    ));
}

#[test]
fn from_rows_defaults_optional_fields() {
    let minimal = row(&[("price", json!("2.00")), ("date", json!("2025-07-15"))]);
    let records = PriceRecord::from_rows(vec![minimal]).unwrap();
    assert_eq!(records[0].unit, "each");
    assert!(records[0].category_name.is_none());
    assert_eq!(records[0].item_name, "");
}
