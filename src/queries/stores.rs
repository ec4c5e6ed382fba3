//! Store CRUD against the `stores` table.

use crate::error::{Result, TrackerError};
use crate::models::Store;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// StoreQuery
// ---------------------------------------------------------------------------

/// Query interface for grocery stores.
pub struct StoreQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> StoreQuery<'a> {
    /// Create a new `StoreQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// List all stores ordered by name.
    pub fn list(&self) -> Result<Vec<Store>> {
        let (sql, params) = SqlBuilder::new("stores")
            .select(&["id", "name", "location"])
            .order_by(&["name"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Get a single store by id.
    pub fn get(&self, id: i64) -> Result<Option<Store>> {
        let (sql, params) = SqlBuilder::new("stores")
            .select(&["id", "name", "location"])
            .where_eq("id", &id.to_string())
            .limit(1)
            .build();
        let rows: Vec<Store> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Add a store, rejecting duplicate names with `AlreadyExists`.
    ///
    /// Returns the new store's id.
    pub fn add(&self, name: &str, location: Option<&str>) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(TrackerError::InvalidParameter(
                "store name must not be empty".into(),
            ));
        }
        if self.exists(name)? {
            return Err(TrackerError::AlreadyExists(format!("store '{}'", name)));
        }

        let id = self.conn.execute_scalar(
            "INSERT INTO stores (name, location) VALUES (?, ?) RETURNING id",
            &[name.to_string(), location.unwrap_or("").to_string()],
        )?;
        id.and_then(|v| v.as_i64())
            .ok_or_else(|| TrackerError::NotFound(format!("inserted store '{}'", name)))
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let found = self.conn.execute_scalar(
            "SELECT 1 FROM stores WHERE name = ?",
            &[name.to_string()],
        )?;
        Ok(found.is_some())
    }
}
