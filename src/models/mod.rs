//! Data models for the price tracker.
//!
//! `catalog` holds the stored entities (stores, categories, items),
//! `price` the observed price rows, and `views` the derived structures
//! produced by the aggregation engine.

pub mod catalog;
pub mod price;
pub mod views;

pub use catalog::{Category, Item, Store};
pub use price::{NewPrice, PriceRecord, RecordFilter};
pub use views::{ComparisonGroup, DailySummary, StoreEntry, TrendStats};
