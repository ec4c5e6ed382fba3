//! The price aggregation engine.
//!
//! Pure, synchronous transforms from flat [`PriceRecord`] rows to the
//! derived views: today's submissions, a windowed recent-price list,
//! per-item trend statistics, and the cross-store comparison. No shared
//! state and no I/O -- callers fetch rows through the query layer (or any
//! other source) and hand them in as slices.
//!
//! All price math uses [`rust_decimal::Decimal`], so min-finding and tie
//! detection are exact at currency precision. Statistics are computed at
//! full precision; two-place rounding belongs to presentation
//! (see [`TrendStats`]' display helpers).

use std::collections::HashMap;

use chrono::{NaiveDate, TimeDelta};
use rust_decimal::Decimal;

use crate::config::UNCATEGORIZED;
use crate::error::{Result, TrackerError};
use crate::models::{ComparisonGroup, DailySummary, PriceRecord, StoreEntry, TrendStats};

/// Select the records dated exactly `today`.
///
/// An empty result is the normal "no prices entered today yet" state, not
/// an error. The function is idempotent: re-applying it to its own output
/// (for the same `today`) changes nothing.
pub fn summarize_today(records: &[PriceRecord], today: NaiveDate) -> DailySummary {
    let entries = records
        .iter()
        .filter(|r| r.date == today)
        .cloned()
        .collect();
    DailySummary { date: today, entries }
}

/// Select the records dated within the trailing `days`-day window ending
/// at `today` (inclusive lower bound `today - days`).
///
/// `days` must be positive; zero or negative values fail with
/// `InvalidParameter` rather than silently returning everything or
/// nothing. Increasing `days` only ever adds records.
pub fn filter_recent(
    records: &[PriceRecord],
    days: i64,
    today: NaiveDate,
) -> Result<Vec<PriceRecord>> {
    let cutoff = window_start(days, today)?;
    Ok(records.iter().filter(|r| r.date >= cutoff).cloned().collect())
}

/// Compute min/max/average statistics and an ordered history for one item
/// over the trailing `window_days`-day window.
///
/// Returns `Ok(None)` when the item has no records in the window -- an
/// explicit no-history state, never NaN or a zeroed struct. History is
/// sorted ascending by date; same-date entries keep their input order.
pub fn compute_trend(
    records: &[PriceRecord],
    item_id: i64,
    window_days: i64,
    today: NaiveDate,
) -> Result<Option<TrendStats>> {
    let windowed = filter_recent(records, window_days, today)?;
    let mut history: Vec<PriceRecord> = windowed
        .into_iter()
        .filter(|r| r.item_id == item_id)
        .collect();

    if history.is_empty() {
        return Ok(None);
    }

    // Vec::sort_by is stable, preserving fetch order within a date.
    history.sort_by(|a, b| a.date.cmp(&b.date));

    let mut min = history[0].price;
    let mut max = history[0].price;
    let mut sum = Decimal::ZERO;
    for record in &history {
        min = min.min(record.price);
        max = max.max(record.price);
        sum += record.price;
    }
    let average = sum / Decimal::from(history.len() as u64);

    Ok(Some(TrendStats {
        item_id,
        min,
        max,
        average,
        history,
    }))
}

/// Group records by item name and flag the cheapest store(s) in each group.
///
/// Callers are expected to pass the latest price per (item, store) pair
/// (see [`PriceQuery::latest_per_store`]); entries are not deduplicated
/// here. `best_price` is the exact minimum of the group, and every entry
/// equal to it is flagged best -- ties are never broken arbitrarily.
/// Groups appear in first-encounter order and are never empty.
///
/// [`PriceQuery::latest_per_store`]: crate::queries::prices::PriceQuery::latest_per_store
pub fn compare_across_stores(records: &[PriceRecord]) -> Vec<ComparisonGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, ComparisonGroup> = HashMap::new();

    for record in records {
        let group = groups
            .entry(record.item_name.clone())
            .or_insert_with(|| {
                order.push(record.item_name.clone());
                ComparisonGroup {
                    item_name: record.item_name.clone(),
                    unit: record.unit.clone(),
                    category: record
                        .category_name
                        .clone()
                        .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                    stores: Vec::new(),
                    best_price: Decimal::ZERO,
                }
            });
        group.stores.push(StoreEntry {
            store_name: record.store_name.clone(),
            price: record.price,
            date: record.date,
            best: false,
        });
    }

    let mut out = Vec::with_capacity(order.len());
    for name in order {
        if let Some(mut group) = groups.remove(&name) {
            // Every group has at least one entry by construction.
            if let Some(best) = group.stores.iter().map(|s| s.price).min() {
                group.best_price = best;
                for entry in &mut group.stores {
                    entry.best = entry.price == best;
                }
                out.push(group);
            }
        }
    }
    out
}

/// Compute the inclusive window start `today - days`, validating `days`.
///
/// Shared with the query layer so window validation and its error wording
/// stay identical on both paths.
pub(crate) fn window_start(days: i64, today: NaiveDate) -> Result<NaiveDate> {
    if days <= 0 {
        return Err(TrackerError::InvalidParameter(format!(
            "days must be a positive number of days, got {}",
            days
        )));
    }
    today
        .checked_sub_signed(TimeDelta::days(days))
        .ok_or_else(|| {
            TrackerError::InvalidParameter(format!("window of {} days is out of range", days))
        })
}
