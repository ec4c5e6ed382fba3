//! Item CRUD against the `items` table, with category names resolved by a
//! LEFT JOIN so uncategorized items survive the listing.

use std::collections::BTreeMap;

use crate::config::{DEFAULT_UNIT, UNCATEGORIZED};
use crate::error::{Result, TrackerError};
use crate::models::Item;

const ITEM_COLUMNS: &str = "items.id, items.name, items.category_id, \
     categories.name AS category_name, COALESCE(items.unit, 'each') AS unit";

// ---------------------------------------------------------------------------
// ItemQuery
// ---------------------------------------------------------------------------

/// Query interface for tracked grocery items.
pub struct ItemQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ItemQuery<'a> {
    /// Create a new `ItemQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// List all items ordered by name, with category names resolved.
    pub fn list(&self) -> Result<Vec<Item>> {
        let sql = format!(
            "SELECT {} FROM items \
             LEFT JOIN categories ON items.category_id = categories.id \
             ORDER BY items.name",
            ITEM_COLUMNS
        );
        self.conn.execute_into(&sql, &[])
    }

    /// Get a single item by id.
    pub fn get(&self, id: i64) -> Result<Option<Item>> {
        let sql = format!(
            "SELECT {} FROM items \
             LEFT JOIN categories ON items.category_id = categories.id \
             WHERE items.id = ?",
            ITEM_COLUMNS
        );
        let rows: Vec<Item> = self.conn.execute_into(&sql, &[id.to_string()])?;
        Ok(rows.into_iter().next())
    }

    /// Add an item. `unit` defaults to `"each"`; `category_id` may be absent
    /// (the item then lists under the "Other" bucket).
    ///
    /// Returns the new item's id.
    pub fn add(&self, name: &str, category_id: Option<i64>, unit: Option<&str>) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(TrackerError::InvalidParameter(
                "item name must not be empty".into(),
            ));
        }
        if let Some(cid) = category_id {
            let found = self
                .conn
                .execute_scalar("SELECT 1 FROM categories WHERE id = ?", &[cid.to_string()])?;
            if found.is_none() {
                return Err(TrackerError::NotFound(format!("category id {}", cid)));
            }
        }

        let unit = unit.unwrap_or(DEFAULT_UNIT);
        // Uncategorized items omit the column so it stays NULL
        let (sql, params) = match category_id {
            Some(cid) => (
                "INSERT INTO items (name, category_id, unit) VALUES (?, ?, ?) RETURNING id",
                vec![name.to_string(), cid.to_string(), unit.to_string()],
            ),
            None => (
                "INSERT INTO items (name, unit) VALUES (?, ?) RETURNING id",
                vec![name.to_string(), unit.to_string()],
            ),
        };

        let id = self.conn.execute_scalar(sql, &params)?;
        id.and_then(|v| v.as_i64())
            .ok_or_else(|| TrackerError::NotFound(format!("inserted item '{}'", name)))
    }

    /// List items bucketed by category name, sorted by bucket name.
    ///
    /// Items without a category land in the "Other" bucket. This mirrors the
    /// grouped item picker: bucket names sorted, items in name order within.
    pub fn grouped_by_category(&self) -> Result<BTreeMap<String, Vec<Item>>> {
        let mut grouped: BTreeMap<String, Vec<Item>> = BTreeMap::new();
        for item in self.list()? {
            let bucket = item
                .category_name
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            grouped.entry(bucket).or_default().push(item);
        }
        Ok(grouped)
    }
}
