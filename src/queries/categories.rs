//! Category CRUD against the `categories` table.

use crate::error::{Result, TrackerError};
use crate::models::Category;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// CategoryQuery
// ---------------------------------------------------------------------------

/// Query interface for item categories.
pub struct CategoryQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> CategoryQuery<'a> {
    /// Create a new `CategoryQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// List all categories ordered by name.
    pub fn list(&self) -> Result<Vec<Category>> {
        let (sql, params) = SqlBuilder::new("categories")
            .select(&["id", "name"])
            .order_by(&["name"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Get a single category by id.
    pub fn get(&self, id: i64) -> Result<Option<Category>> {
        let (sql, params) = SqlBuilder::new("categories")
            .select(&["id", "name"])
            .where_eq("id", &id.to_string())
            .limit(1)
            .build();
        let rows: Vec<Category> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Add a category, rejecting duplicate names with `AlreadyExists`.
    ///
    /// Returns the new category's id.
    pub fn add(&self, name: &str) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(TrackerError::InvalidParameter(
                "category name must not be empty".into(),
            ));
        }
        let found = self.conn.execute_scalar(
            "SELECT 1 FROM categories WHERE name = ?",
            &[name.to_string()],
        )?;
        if found.is_some() {
            return Err(TrackerError::AlreadyExists(format!("category '{}'", name)));
        }

        let id = self.conn.execute_scalar(
            "INSERT INTO categories (name) VALUES (?) RETURNING id",
            &[name.to_string()],
        )?;
        id.and_then(|v| v.as_i64())
            .ok_or_else(|| TrackerError::NotFound(format!("inserted category '{}'", name)))
    }
}
