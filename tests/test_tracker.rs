//! End-to-end tracker tests: builder, persistence and the derived views.

mod common;

use chrono::Days;
use price_tracker_sdk::PriceTracker;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn file_backed_tracker_persists_between_opens() {
    let tmp_dir = tempfile::tempdir().unwrap();

    {
        let tracker = PriceTracker::builder()
            .data_dir(tmp_dir.path())
            .build()
            .unwrap();
        tracker.stores().add("Northmart", None).unwrap();
        tracker.close();
    }

    let tracker = PriceTracker::builder()
        .data_dir(tmp_dir.path())
        .build()
        .unwrap();
    let stores = tracker.stores().list().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].name, "Northmart");
}

#[test]
fn display_names_the_database_location() {
    let tracker = PriceTracker::builder().in_memory().build().unwrap();
    assert_eq!(tracker.to_string(), "PriceTracker(db=in-memory)");
}

#[test]
fn sql_escape_hatch_reaches_the_schema() {
    let fixture = common::setup_sample_tracker();
    let rows = fixture
        .tracker
        .sql("SELECT COUNT(*) AS cnt FROM prices", &[])
        .unwrap();
    assert_eq!(rows[0]["cnt"].as_i64().unwrap(), 6);
}

// ---------------------------------------------------------------------------
// daily_summary
// ---------------------------------------------------------------------------

#[test]
fn daily_summary_reflects_todays_entries() {
    let fixture = common::setup_sample_tracker();
    let summary = fixture.tracker.daily_summary(Some(fixture.today)).unwrap();
    assert_eq!(summary.len(), 2);
    assert!(summary.entries.iter().all(|r| r.item_name == "Milk"));
}

#[test]
fn daily_summary_empty_day_is_an_empty_state() {
    let fixture = common::setup_sample_tracker();
    let quiet_day = fixture.today + Days::new(1);
    let summary = fixture.tracker.daily_summary(Some(quiet_day)).unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.date, quiet_day);
}

// ---------------------------------------------------------------------------
// recent_prices
// ---------------------------------------------------------------------------

#[test]
fn recent_prices_defaults_to_thirty_days() {
    let fixture = common::setup_sample_tracker();
    let records = fixture
        .tracker
        .recent_prices(None, Some(fixture.today))
        .unwrap();
    assert_eq!(records.len(), 4);
}

// ---------------------------------------------------------------------------
// price_trend
// ---------------------------------------------------------------------------

#[test]
fn price_trend_computes_window_statistics() {
    let fixture = common::setup_sample_tracker();
    // Default 90-day window: 4.50 (x2 today), 4.75, 5.25; the 120-day-old
    // 3.99 row is excluded.
    let stats = fixture
        .tracker
        .price_trend(fixture.milk, None, Some(fixture.today))
        .unwrap()
        .unwrap();

    assert_eq!(stats.history.len(), 4);
    assert_eq!(stats.min, dec!(4.50));
    assert_eq!(stats.max, dec!(5.25));
    assert_eq!(stats.average_display(), dec!(4.75));
    assert!(stats.min <= stats.average && stats.average <= stats.max);

    // History ascending by date
    for pair in stats.history.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[test]
fn price_trend_wider_window_includes_old_rows() {
    let fixture = common::setup_sample_tracker();
    let stats = fixture
        .tracker
        .price_trend(fixture.milk, Some(365), Some(fixture.today))
        .unwrap()
        .unwrap();
    assert_eq!(stats.history.len(), 5);
    assert_eq!(stats.min, dec!(3.99));
}

#[test]
fn price_trend_without_history_is_none() {
    let fixture = common::setup_sample_tracker();
    let trend = fixture
        .tracker
        .price_trend(fixture.mystery, None, Some(fixture.today))
        .unwrap();
    assert!(trend.is_none());
}

// ---------------------------------------------------------------------------
// price_comparison
// ---------------------------------------------------------------------------

#[test]
fn price_comparison_flags_tied_best_prices() {
    let fixture = common::setup_sample_tracker();
    let groups = fixture.tracker.price_comparison().unwrap();

    // Bread (store A only) and Milk (both stores), ordered by item name
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].item_name, "Bread");
    assert_eq!(groups[1].item_name, "Milk");

    let milk = &groups[1];
    assert_eq!(milk.best_price, dec!(4.50));
    // Both stores tie at 4.50 today; both are flagged
    assert_eq!(milk.stores.len(), 2);
    assert_eq!(milk.best_entries().count(), 2);

    let bread = &groups[0];
    assert_eq!(bread.stores.len(), 1);
    assert!(bread.stores[0].best);
    assert_eq!(bread.category, "Bakery");
}

#[test]
fn price_comparison_uses_latest_price_per_store() {
    let fixture = common::setup_sample_tracker();
    // Milk at store A dropped to 4.10 the day after the fixture rows
    common::add_price(
        &fixture.tracker,
        fixture.milk,
        fixture.store_a,
        "4.10",
        fixture.today + Days::new(1),
        None,
    );

    let groups = fixture.tracker.price_comparison().unwrap();
    let milk = groups.iter().find(|g| g.item_name == "Milk").unwrap();
    assert_eq!(milk.best_price, dec!(4.10));
    assert_eq!(milk.best_entries().count(), 1);
    assert_eq!(milk.best_entries().next().unwrap().store_name, "Northmart");
}

#[test]
fn price_comparison_empty_database_gives_no_groups() {
    let tracker = PriceTracker::builder().in_memory().build().unwrap();
    assert!(tracker.price_comparison().unwrap().is_empty());
}

#[test]
fn price_comparison_uncategorized_item_lands_in_other() {
    let fixture = common::setup_sample_tracker();
    common::add_price(
        &fixture.tracker,
        fixture.mystery,
        fixture.store_a,
        "2.00",
        fixture.today,
        None,
    );

    let groups = fixture.tracker.price_comparison().unwrap();
    let mystery = groups.iter().find(|g| g.item_name == "Mystery Snack").unwrap();
    assert_eq!(mystery.category, "Other");
}

// ---------------------------------------------------------------------------
// Serde round-trip of derived views
// ---------------------------------------------------------------------------

#[test]
fn derived_views_serialize_for_rendering_layers() {
    let fixture = common::setup_sample_tracker();
    let groups = fixture.tracker.price_comparison().unwrap();
    let json = serde_json::to_value(&groups).unwrap();
    assert!(json.as_array().unwrap().len() == 2);

    let summary = fixture.tracker.daily_summary(Some(fixture.today)).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["date"], "2025-07-15");
}
