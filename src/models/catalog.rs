use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Store — A grocery store prices are observed at
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
}

// ---------------------------------------------------------------------------
// Category — An item category (Produce, Dairy, ...)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Item — A tracked grocery item
// ---------------------------------------------------------------------------

/// `category_name` is resolved by a LEFT JOIN at query time; items without
/// a category carry `None` and are displayed under the "Other" bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub unit: String,
}
