use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TrackerError};

// ---------------------------------------------------------------------------
// PriceRecord — One observed price of an item at a store on a date
// ---------------------------------------------------------------------------

/// A fully joined price row: the price itself plus the item, store and
/// category names it belongs to. Immutable once fetched; the aggregation
/// engine only reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub category_name: Option<String>,
    pub unit: String,
    pub store_id: i64,
    pub store_name: String,
    pub price: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl PriceRecord {
    /// Validate and convert raw storage rows into typed records.
    ///
    /// Rows from an external source may be missing fields. A row with a
    /// missing, null or negative `price`, or a missing/unparseable `date`,
    /// fails the whole batch with [`TrackerError::MalformedRecord`] naming
    /// the offending row position -- aggregation never silently skips rows.
    pub fn from_rows(rows: Vec<HashMap<String, Value>>) -> Result<Vec<PriceRecord>> {
        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            records.push(Self::from_row(index, row)?);
        }
        Ok(records)
    }

    fn from_row(index: usize, row: HashMap<String, Value>) -> Result<PriceRecord> {
        let price: Decimal = field(&row, index, "price")?;
        if price.is_sign_negative() {
            return Err(TrackerError::MalformedRecord { index, field: "price" });
        }
        let date: NaiveDate = field(&row, index, "date")?;

        Ok(PriceRecord {
            id: opt_field(&row, "id").unwrap_or_default(),
            item_id: opt_field(&row, "item_id").unwrap_or_default(),
            item_name: opt_field(&row, "item_name").unwrap_or_default(),
            category_name: opt_field(&row, "category_name"),
            unit: opt_field(&row, "unit").unwrap_or_else(|| crate::config::DEFAULT_UNIT.into()),
            store_id: opt_field(&row, "store_id").unwrap_or_default(),
            store_name: opt_field(&row, "store_name").unwrap_or_default(),
            price,
            date,
            notes: opt_field(&row, "notes"),
        })
    }
}

/// Deserialize a required field, mapping any absence or type mismatch to
/// `MalformedRecord`.
fn field<T: serde::de::DeserializeOwned>(
    row: &HashMap<String, Value>,
    index: usize,
    name: &'static str,
) -> Result<T> {
    row.get(name)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or(TrackerError::MalformedRecord { index, field: name })
}

/// Deserialize an optional field, treating absence, null and type
/// mismatches alike as `None`.
fn opt_field<T: serde::de::DeserializeOwned>(
    row: &HashMap<String, Value>,
    name: &str,
) -> Option<T> {
    row.get(name)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

// ---------------------------------------------------------------------------
// NewPrice — Insert payload for a price observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrice {
    pub item_id: i64,
    pub store_id: i64,
    pub price: Decimal,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// RecordFilter — Fetch filter for price records
// ---------------------------------------------------------------------------

/// Filter for [`PriceQuery::list`](crate::queries::prices::PriceQuery::list).
///
/// `days` restricts to records dated within the trailing window ending at
/// `today`; `item_id` restricts to one item. `today` exists so tests can
/// pin the reference date instead of depending on the wall clock.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub days: Option<i64>,
    pub item_id: Option<i64>,
    pub today: Option<NaiveDate>,
}
