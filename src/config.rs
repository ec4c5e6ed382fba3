use std::path::PathBuf;

/// Default trailing window (in days) for trend statistics.
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 90;

/// Default window (in days) for the recent-prices listing.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// Unit assigned to items created without an explicit unit.
pub const DEFAULT_UNIT: &str = "each";

/// Category label used for items that have no category assigned.
pub const UNCATEGORIZED: &str = "Other";

/// Filename of the DuckDB database inside the data directory.
pub const DATABASE_FILE: &str = "prices.duckdb";

/// Schema bootstrap DDL. Sequences stand in for SQLite-style AUTOINCREMENT.
pub const SCHEMA_DDL: &str = r#"
CREATE SEQUENCE IF NOT EXISTS store_id_seq;
CREATE SEQUENCE IF NOT EXISTS category_id_seq;
CREATE SEQUENCE IF NOT EXISTS item_id_seq;
CREATE SEQUENCE IF NOT EXISTS price_id_seq;

CREATE TABLE IF NOT EXISTS stores (
    id BIGINT PRIMARY KEY DEFAULT nextval('store_id_seq'),
    name VARCHAR NOT NULL UNIQUE,
    location VARCHAR,
    created_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS categories (
    id BIGINT PRIMARY KEY DEFAULT nextval('category_id_seq'),
    name VARCHAR NOT NULL UNIQUE,
    created_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS items (
    id BIGINT PRIMARY KEY DEFAULT nextval('item_id_seq'),
    name VARCHAR NOT NULL,
    category_id BIGINT,
    unit VARCHAR,
    created_at TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS prices (
    id BIGINT PRIMARY KEY DEFAULT nextval('price_id_seq'),
    item_id BIGINT NOT NULL,
    store_id BIGINT NOT NULL,
    price DECIMAL(12, 2) NOT NULL,
    date DATE NOT NULL,
    notes VARCHAR,
    created_at TIMESTAMP DEFAULT current_timestamp
);
"#;

/// Stores seeded on first bootstrap when the builder asks for defaults.
pub fn default_stores() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Independent Grocer", "Yellowknife, NT"),
        ("Extra Foods", "Yellowknife, NT"),
        ("The Co-op", "Yellowknife, NT"),
        ("Save-On-Foods", "Yellowknife, NT"),
    ]
}

/// Categories seeded on first bootstrap when the builder asks for defaults.
pub fn default_categories() -> Vec<&'static str> {
    vec![
        "Produce", "Dairy", "Meat", "Bakery", "Pantry", "Frozen", "Beverages", "Snacks",
    ]
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("price-tracker-sdk")
    } else {
        PathBuf::from(".price-tracker-data")
    }
}
