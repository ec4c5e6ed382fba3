//! Shared test fixtures for the price tracker integration tests.
//!
//! Provides `setup_sample_tracker()` which builds an in-memory tracker
//! populated with a small catalog (stores, categories, items) and price
//! rows pinned to a fixed reference date, so tests never depend on the
//! wall clock.

// Not every test binary touches every fixture field or helper.
#![allow(dead_code)]

use chrono::NaiveDate;
use price_tracker_sdk::{NewPrice, PriceTracker};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Catalog and row ids created by the fixture, plus the pinned "today".
pub struct Fixture {
    pub tracker: PriceTracker,
    pub today: NaiveDate,
    pub store_a: i64,
    pub store_b: i64,
    pub milk: i64,
    pub bread: i64,
    pub mystery: i64,
}

/// Build an in-memory tracker with:
///
/// - stores: "Northmart" (A), "The Co-op" (B)
/// - categories: Dairy, Bakery
/// - items: Milk (Dairy, litre), Bread (Bakery, loaf),
///   "Mystery Snack" (no category, each)
/// - prices: Milk at both stores today (tie at 4.50, plus older rows),
///   Bread at store A, nothing for Mystery Snack
///
/// "Today" is pinned to 2025-07-15.
pub fn setup_sample_tracker() -> Fixture {
    let tracker = PriceTracker::builder().in_memory().build().unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();

    let store_a = tracker.stores().add("Northmart", Some("Yellowknife, NT")).unwrap();
    let store_b = tracker.stores().add("The Co-op", Some("Yellowknife, NT")).unwrap();

    let dairy = tracker.categories().add("Dairy").unwrap();
    let bakery = tracker.categories().add("Bakery").unwrap();

    let milk = tracker.items().add("Milk", Some(dairy), Some("litre")).unwrap();
    let bread = tracker.items().add("Bread", Some(bakery), Some("loaf")).unwrap();
    let mystery = tracker.items().add("Mystery Snack", None, None).unwrap();

    // Milk: tie at both stores today, plus history at store A
    add_price(&tracker, milk, store_a, "4.50", today, None);
    add_price(&tracker, milk, store_b, "4.50", today, Some("on sale"));
    add_price(&tracker, milk, store_a, "4.75", today - chrono::Days::new(10), None);
    add_price(&tracker, milk, store_a, "5.25", today - chrono::Days::new(40), None);
    // Outside the default 90-day trend window
    add_price(&tracker, milk, store_a, "3.99", today - chrono::Days::new(120), None);

    // Bread: store A only, recorded a week ago
    add_price(&tracker, bread, store_a, "3.25", today - chrono::Days::new(7), None);

    Fixture {
        tracker,
        today,
        store_a,
        store_b,
        milk,
        bread,
        mystery,
    }
}

pub fn add_price(
    tracker: &PriceTracker,
    item_id: i64,
    store_id: i64,
    price: &str,
    date: NaiveDate,
    notes: Option<&str>,
) -> i64 {
    tracker
        .prices()
        .add(&NewPrice {
            item_id,
            store_id,
            price: Decimal::from_str(price).unwrap(),
            date: Some(date),
            notes: notes.map(|n| n.to_string()),
        })
        .unwrap()
}
