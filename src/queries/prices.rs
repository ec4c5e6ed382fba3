//! Price-record queries: the row-fetching capability the aggregation
//! engine consumes, plus price submission.
//!
//! Every fetch returns fully joined [`PriceRecord`] rows (item, store and
//! category names resolved). Raw rows pass through
//! [`PriceRecord::from_rows`], so a malformed row fails loudly with its
//! position instead of being skipped.

use chrono::{Local, NaiveDate};

use crate::aggregate::window_start;
use crate::error::{Result, TrackerError};
use crate::models::{NewPrice, PriceRecord, RecordFilter};

const RECORD_COLUMNS: &str = "prices.id, prices.item_id, items.name AS item_name, \
     categories.name AS category_name, COALESCE(items.unit, 'each') AS unit, \
     prices.store_id, stores.name AS store_name, prices.price, prices.date, prices.notes";

const RECORD_JOINS: &str = "JOIN items ON prices.item_id = items.id \
     JOIN stores ON prices.store_id = stores.id \
     LEFT JOIN categories ON items.category_id = categories.id";

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for observed prices.
pub struct PriceQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Fetch price records matching `filter`, ordered by date (newest
    /// first) then item name.
    ///
    /// `filter.days`, when set, must be positive -- zero or negative
    /// windows fail with `InvalidParameter` instead of silently returning
    /// all or no rows.
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<PriceRecord>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(days) = filter.days {
            let today = filter.today.unwrap_or_else(|| Local::now().date_naive());
            let cutoff = window_start(days, today)?;
            clauses.push("prices.date >= ?".to_string());
            params.push(cutoff.to_string());
        }
        if let Some(item_id) = filter.item_id {
            clauses.push("prices.item_id = ?".to_string());
            params.push(item_id.to_string());
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM prices {} {}ORDER BY prices.date DESC, items.name",
            RECORD_COLUMNS, RECORD_JOINS, where_sql
        );

        let rows = self.conn.execute(&sql, &params)?;
        PriceRecord::from_rows(rows)
    }

    /// Fetch one item's price history over the trailing `days`-day window,
    /// ordered newest first.
    pub fn history(&self, item_id: i64, days: i64, today: Option<NaiveDate>) -> Result<Vec<PriceRecord>> {
        self.list(&RecordFilter {
            days: Some(days),
            item_id: Some(item_id),
            today,
        })
    }

    /// Fetch the records dated exactly `date`, ordered by item name.
    pub fn on_date(&self, date: NaiveDate) -> Result<Vec<PriceRecord>> {
        let sql = format!(
            "SELECT {} FROM prices {} WHERE prices.date = ? ORDER BY items.name",
            RECORD_COLUMNS, RECORD_JOINS
        );
        let rows = self.conn.execute(&sql, &[date.to_string()])?;
        PriceRecord::from_rows(rows)
    }

    /// Fetch the latest price per (item, store) pair, ordered by item then
    /// store name -- the input expected by
    /// [`compare_across_stores`](crate::aggregate::compare_across_stores).
    pub fn latest_per_store(&self) -> Result<Vec<PriceRecord>> {
        let sql = format!(
            "WITH latest AS ( \
                 SELECT *, ROW_NUMBER() OVER ( \
                     PARTITION BY item_id, store_id ORDER BY date DESC, id DESC \
                 ) AS rn \
                 FROM prices \
             ) \
             SELECT {} FROM latest AS prices {} \
             WHERE prices.rn = 1 \
             ORDER BY items.name, stores.name",
            RECORD_COLUMNS, RECORD_JOINS
        );
        let rows = self.conn.execute(&sql, &[])?;
        PriceRecord::from_rows(rows)
    }

    /// Record a price observation. `date` defaults to today.
    ///
    /// Rejects negative prices (`InvalidParameter`) and unknown item or
    /// store ids (`NotFound`). Returns the new row's id.
    pub fn add(&self, price: &NewPrice) -> Result<i64> {
        if price.price.is_sign_negative() {
            return Err(TrackerError::InvalidParameter(format!(
                "price must be non-negative, got {}",
                price.price
            )));
        }
        if self
            .conn
            .execute_scalar("SELECT 1 FROM items WHERE id = ?", &[price.item_id.to_string()])?
            .is_none()
        {
            return Err(TrackerError::NotFound(format!("item id {}", price.item_id)));
        }
        if self
            .conn
            .execute_scalar("SELECT 1 FROM stores WHERE id = ?", &[price.store_id.to_string()])?
            .is_none()
        {
            return Err(TrackerError::NotFound(format!("store id {}", price.store_id)));
        }

        let date = price.date.unwrap_or_else(|| Local::now().date_naive());
        // Absent notes omit the column so the row stays NULL
        let (sql, params) = match &price.notes {
            Some(notes) => (
                "INSERT INTO prices (item_id, store_id, price, date, notes) \
                 VALUES (?, ?, ?, ?, ?) RETURNING id",
                vec![
                    price.item_id.to_string(),
                    price.store_id.to_string(),
                    price.price.to_string(),
                    date.to_string(),
                    notes.clone(),
                ],
            ),
            None => (
                "INSERT INTO prices (item_id, store_id, price, date) \
                 VALUES (?, ?, ?, ?) RETURNING id",
                vec![
                    price.item_id.to_string(),
                    price.store_id.to_string(),
                    price.price.to_string(),
                    date.to_string(),
                ],
            ),
        };
        let id = self.conn.execute_scalar(sql, &params)?;
        id.and_then(|v| v.as_i64())
            .ok_or_else(|| TrackerError::NotFound("inserted price row".into()))
    }

    /// Count all price rows.
    pub fn count(&self) -> Result<i64> {
        let cnt = self
            .conn
            .execute_scalar("SELECT COUNT(*) FROM prices", &[])?;
        Ok(cnt.and_then(|v| v.as_i64()).unwrap_or(0))
    }
}
