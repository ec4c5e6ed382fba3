//! Query modules for the price tracker.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes typed CRUD and
//! fetch methods returning `Result<T>`. [`PriceQuery`] is the row-fetching
//! capability the aggregation engine consumes.

pub mod categories;
pub mod items;
pub mod prices;
pub mod stores;

pub use categories::CategoryQuery;
pub use items::ItemQuery;
pub use prices::PriceQuery;
pub use stores::StoreQuery;
