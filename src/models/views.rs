//! Derived view structures produced by the aggregation engine.
//!
//! These are plain data: a rendering layer binds them to whatever UI it
//! likes. Statistics are kept at full decimal precision; rounding to two
//! places happens only through the `*_display` helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PriceRecord;

// ---------------------------------------------------------------------------
// DailySummary — Prices recorded on one calendar date
// ---------------------------------------------------------------------------

/// An empty summary is a valid state ("no prices entered today yet"),
/// distinct from any error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub entries: Vec<PriceRecord>,
}

impl DailySummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// TrendStats — Windowed price statistics for one item
// ---------------------------------------------------------------------------

/// `min`, `max` and `average` are exact decimals computed before any
/// rounding. `history` is ordered ascending by date; same-date entries
/// keep their original fetch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendStats {
    pub item_id: i64,
    pub min: Decimal,
    pub max: Decimal,
    pub average: Decimal,
    pub history: Vec<PriceRecord>,
}

impl TrendStats {
    /// Minimum price rounded to currency precision.
    pub fn min_display(&self) -> Decimal {
        self.min.round_dp(2)
    }

    /// Maximum price rounded to currency precision.
    pub fn max_display(&self) -> Decimal {
        self.max.round_dp(2)
    }

    /// Average price rounded to currency precision.
    pub fn average_display(&self) -> Decimal {
        self.average.round_dp(2)
    }
}

// ---------------------------------------------------------------------------
// ComparisonGroup — One item's latest prices across stores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEntry {
    pub store_name: String,
    pub price: Decimal,
    pub date: NaiveDate,
    /// True when `price` equals the group's minimum. Ties are not broken:
    /// every entry matching the minimum is flagged.
    pub best: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonGroup {
    pub item_name: String,
    pub unit: String,
    /// Category name, or "Other" for uncategorized items.
    pub category: String,
    pub stores: Vec<StoreEntry>,
    pub best_price: Decimal,
}

impl ComparisonGroup {
    /// Entries flagged as the best price (at least one; more on exact ties).
    pub fn best_entries(&self) -> impl Iterator<Item = &StoreEntry> {
        self.stores.iter().filter(|s| s.best)
    }
}
