//! Grocery price tracker SDK.
//!
//! Tracks observed grocery prices per item, store and date in a local
//! DuckDB database, and derives comparison and trend views from them: the
//! day's submissions, a windowed recent-price list, per-item min/max/average
//! statistics, and a cross-store comparison with the cheapest store(s)
//! flagged.
//!
//! # Quick start
//!
//! ```no_run
//! use price_tracker_sdk::PriceTracker;
//!
//! let tracker = PriceTracker::builder().in_memory().build().unwrap();
//!
//! // Catalog
//! let stores = tracker.stores().list().unwrap();
//!
//! // Derived views
//! let comparison = tracker.price_comparison().unwrap();
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod demo;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncPriceTracker;
pub use connection::Connection;
pub use error::{Result, TrackerError};
pub use models::{
    Category, ComparisonGroup, DailySummary, Item, NewPrice, PriceRecord, RecordFilter, Store,
    StoreEntry, TrendStats,
};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

// ---------------------------------------------------------------------------
// PriceTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceTracker`] instance.
///
/// Use [`PriceTracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceTrackerBuilder::build) to create the
/// tracker.
#[derive(Default)]
pub struct PriceTrackerBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    seed_defaults: bool,
}

impl PriceTrackerBuilder {
    /// Set a custom data directory for the database file.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/price-tracker-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a transient in-memory database instead of a file.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Seed the default stores and categories on build.
    ///
    /// Seeding is idempotent: names that already exist are skipped.
    pub fn seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    /// Build the tracker, opening the database and bootstrapping the schema.
    pub fn build(self) -> Result<PriceTracker> {
        let (conn, location) = if self.in_memory {
            (Connection::open_in_memory()?, "in-memory".to_string())
        } else {
            let dir = self.data_dir.unwrap_or_else(config::default_data_dir);
            std::fs::create_dir_all(&dir)?;
            let path = dir.join(config::DATABASE_FILE);
            let location = path.display().to_string();
            (Connection::open(&path)?, location)
        };
        if self.seed_defaults {
            conn.seed_defaults()?;
        }
        Ok(PriceTracker { conn, location })
    }
}

// ---------------------------------------------------------------------------
// PriceTracker
// ---------------------------------------------------------------------------

/// The main entry point for the price tracker SDK.
///
/// Wraps a [`Connection`] and exposes catalog and price query interfaces as
/// lightweight borrowing wrappers, plus convenience methods that fetch rows
/// and run the [`aggregate`] engine over them.
///
/// Created via [`PriceTracker::builder()`].
pub struct PriceTracker {
    conn: Connection,
    location: String,
}

impl PriceTracker {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> PriceTrackerBuilder {
        PriceTrackerBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the store query interface.
    ///
    /// Returns a lightweight wrapper that borrows from the underlying
    /// connection and provides CRUD methods for stores.
    pub fn stores(&self) -> queries::stores::StoreQuery<'_> {
        queries::stores::StoreQuery::new(&self.conn)
    }

    /// Access the category query interface.
    pub fn categories(&self) -> queries::categories::CategoryQuery<'_> {
        queries::categories::CategoryQuery::new(&self.conn)
    }

    /// Access the item query interface.
    pub fn items(&self) -> queries::items::ItemQuery<'_> {
        queries::items::ItemQuery::new(&self.conn)
    }

    /// Access the price query interface -- the row-fetching capability the
    /// aggregation engine consumes.
    pub fn prices(&self) -> queries::prices::PriceQuery<'_> {
        queries::prices::PriceQuery::new(&self.conn)
    }

    /// Access the sample data generator.
    ///
    /// Fabricates price observations for the default stores so the derived
    /// views have data before any real prices are entered.
    pub fn demo(&self) -> demo::DemoDataGenerator<'_> {
        demo::DemoDataGenerator::new(&self.conn)
    }

    // -- Derived views -----------------------------------------------------

    /// Today's price submissions grouped into a [`DailySummary`].
    ///
    /// `today` can be pinned for testability; it defaults to the local
    /// calendar date. An empty summary means "no prices entered today yet".
    pub fn daily_summary(&self, today: Option<NaiveDate>) -> Result<DailySummary> {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let records = self.prices().on_date(today)?;
        Ok(aggregate::summarize_today(&records, today))
    }

    /// Price records from the trailing `days`-day window, newest first.
    ///
    /// `days` defaults to [`config::DEFAULT_RECENT_DAYS`]; non-positive
    /// values fail with `InvalidParameter`.
    pub fn recent_prices(
        &self,
        days: Option<i64>,
        today: Option<NaiveDate>,
    ) -> Result<Vec<PriceRecord>> {
        self.prices().list(&RecordFilter {
            days: Some(days.unwrap_or(config::DEFAULT_RECENT_DAYS)),
            item_id: None,
            today,
        })
    }

    /// Trend statistics for one item over the trailing window
    /// (default [`config::DEFAULT_TREND_WINDOW_DAYS`] days).
    ///
    /// `Ok(None)` means the item has no history in the window.
    pub fn price_trend(
        &self,
        item_id: i64,
        window_days: Option<i64>,
        today: Option<NaiveDate>,
    ) -> Result<Option<TrendStats>> {
        let window = window_days.unwrap_or(config::DEFAULT_TREND_WINDOW_DAYS);
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let records = self.prices().history(item_id, window, Some(today))?;
        aggregate::compute_trend(&records, item_id, window, today)
    }

    /// Cross-store comparison of the latest price per (item, store) pair,
    /// grouped by item with the cheapest store(s) flagged.
    pub fn price_comparison(&self) -> Result<Vec<ComparisonGroup>> {
        let records = self.prices().latest_per_store()?;
        Ok(aggregate::compare_across_stores(&records))
    }

    // -- Utility methods ---------------------------------------------------

    /// Execute a raw SQL query against the underlying database.
    ///
    /// Provides escape-hatch access for queries not covered by the typed
    /// interfaces.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    ///
    /// # Returns
    ///
    /// A vector of rows, each represented as a `HashMap<String, serde_json::Value>`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Consume the tracker and release the database handle.
    ///
    /// This is called automatically when the tracker is dropped, but can be
    /// invoked explicitly for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PriceTracker(db={})", self.location)
    }
}
