//! Sample price data generator.
//!
//! Fabricates realistic grocery price observations for the default stores
//! so the comparison and trend views have something to show before any real
//! prices are entered. Each observation draws a price uniformly from a
//! per-product range; a fraction of observations are marked down and noted
//! as a sale.

use chrono::{Days, Local, NaiveDate};
use rand::prelude::*;
use rust_decimal::Decimal;

use crate::config;
use crate::connection::Connection;
use crate::error::{Result, TrackerError};
use crate::models::NewPrice;
use crate::queries::categories::CategoryQuery;
use crate::queries::items::ItemQuery;
use crate::queries::prices::PriceQuery;
use crate::queries::stores::StoreQuery;

/// Sample catalog per category: `(name, unit, (low, high))` with the price
/// range in cents.
pub const SAMPLE_PRODUCTS: &[(&str, &[(&str, &str, (i64, i64))])] = &[
    (
        "Produce",
        &[
            ("Bananas", "lb", (69, 129)),
            ("Apples - Gala", "lb", (149, 299)),
            ("Tomatoes", "lb", (199, 349)),
            ("Lettuce - Romaine", "each", (249, 399)),
            ("Potatoes - Russet", "10lb bag", (499, 799)),
            ("Carrots", "2lb bag", (299, 449)),
            ("Onions - Yellow", "lb", (99, 199)),
            ("Broccoli", "each", (249, 399)),
        ],
    ),
    (
        "Dairy",
        &[
            ("Milk - 2L", "2L", (499, 699)),
            ("Butter - 454g", "454g", (599, 799)),
            ("Cheese - Cheddar 400g", "400g", (699, 999)),
            ("Yogurt - Greek 750g", "750g", (499, 649)),
            ("Eggs - Large Dozen", "dozen", (449, 699)),
            ("Sour Cream - 500ml", "500ml", (399, 549)),
        ],
    ),
    (
        "Meat",
        &[
            ("Chicken Breast", "lb", (699, 1199)),
            ("Ground Beef - Lean", "lb", (599, 999)),
            ("Pork Chops", "lb", (549, 899)),
            ("Bacon - 500g", "500g", (699, 999)),
            ("Salmon Fillet", "lb", (1299, 1899)),
        ],
    ),
    (
        "Bakery",
        &[
            ("White Bread - 570g", "570g", (299, 449)),
            ("Whole Wheat Bread", "570g", (349, 499)),
            ("Bagels - 6 pack", "6pk", (399, 599)),
            ("Croissants - 4 pack", "4pk", (499, 699)),
        ],
    ),
    (
        "Pantry",
        &[
            ("Pasta - 900g", "900g", (199, 349)),
            ("Rice - 2kg", "2kg", (499, 799)),
            ("Olive Oil - 1L", "1L", (899, 1499)),
            ("Canned Tomatoes - 796ml", "796ml", (199, 299)),
            ("Peanut Butter - 1kg", "1kg", (699, 999)),
        ],
    ),
    (
        "Frozen",
        &[
            ("Frozen Pizza", "each", (599, 899)),
            ("Ice Cream - 1.5L", "1.5L", (499, 799)),
            ("Frozen Vegetables - 750g", "750g", (349, 549)),
        ],
    ),
    (
        "Beverages",
        &[
            ("Orange Juice - 1.75L", "1.75L", (499, 699)),
            ("Coffee - 900g", "900g", (1199, 1699)),
            ("Pop - 12 pack", "12pk", (599, 899)),
        ],
    ),
];

/// Chance that a generated observation is marked down.
const SALE_CHANCE: f64 = 0.2;

/// Note attached to marked-down observations.
const SALE_NOTE: &str = "On sale";

/// Generates sample price observations over the [`SAMPLE_PRODUCTS`] catalog.
///
/// Catalog rows (stores, categories, items) are created on demand and
/// reused across runs, so repeated generation only appends price history.
pub struct DemoDataGenerator<'a> {
    conn: &'a Connection,
}

impl<'a> DemoDataGenerator<'a> {
    /// Create a new `DemoDataGenerator` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Return the category names the sample catalog covers.
    pub fn sample_categories() -> Vec<&'static str> {
        SAMPLE_PRODUCTS.iter().map(|(category, _)| *category).collect()
    }

    /// Generate one observation per catalog product for `store_name`,
    /// dated `date`. The store and any missing catalog rows are created.
    ///
    /// Returns the number of price rows inserted.
    pub fn generate_store(&self, store_name: &str, date: NaiveDate) -> Result<usize> {
        let store_id = self.store_id(store_name)?;
        let prices = PriceQuery::new(self.conn);
        let mut rng = thread_rng();
        let mut inserted = 0;

        for (category, products) in SAMPLE_PRODUCTS {
            let category_id = self.category_id(category)?;
            for (name, unit, (low, high)) in products.iter() {
                let item_id = self.item_id(name, category_id, unit)?;

                let mut price = Decimal::new(rng.gen_range(*low..=*high), 2);
                let mut notes = None;
                if rng.gen_bool(SALE_CHANCE) {
                    // 15% off
                    price = (price * Decimal::new(85, 2)).round_dp(2);
                    notes = Some(SALE_NOTE.to_string());
                }

                prices.add(&NewPrice {
                    item_id,
                    store_id,
                    price,
                    date: Some(date),
                    notes,
                })?;
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    /// Generate weekly observations for every default store over the
    /// trailing `weeks`-week window ending at `today` (default: the local
    /// calendar date).
    ///
    /// Returns the total number of price rows inserted.
    pub fn populate(&self, weeks: u64, today: Option<NaiveDate>) -> Result<usize> {
        if weeks == 0 {
            return Err(TrackerError::InvalidParameter(
                "weeks must be positive".into(),
            ));
        }
        let today = today.unwrap_or_else(|| Local::now().date_naive());

        let mut inserted = 0;
        for week in 0..weeks {
            let date = today.checked_sub_days(Days::new(week * 7)).ok_or_else(|| {
                TrackerError::InvalidParameter(format!(
                    "window of {} weeks is out of range",
                    weeks
                ))
            })?;
            for (store, _) in config::default_stores() {
                inserted += self.generate_store(store, date)?;
            }
        }

        if inserted > 0 {
            eprintln!("Generated {} sample price rows", inserted);
        }
        Ok(inserted)
    }

    fn store_id(&self, name: &str) -> Result<i64> {
        let found = self
            .conn
            .execute_scalar("SELECT id FROM stores WHERE name = ?", &[name.to_string()])?;
        match found.and_then(|v| v.as_i64()) {
            Some(id) => Ok(id),
            None => StoreQuery::new(self.conn).add(name, None),
        }
    }

    fn category_id(&self, name: &str) -> Result<i64> {
        let found = self.conn.execute_scalar(
            "SELECT id FROM categories WHERE name = ?",
            &[name.to_string()],
        )?;
        match found.and_then(|v| v.as_i64()) {
            Some(id) => Ok(id),
            None => CategoryQuery::new(self.conn).add(name),
        }
    }

    fn item_id(&self, name: &str, category_id: i64, unit: &str) -> Result<i64> {
        let found = self.conn.execute_scalar(
            "SELECT id FROM items WHERE name = ? AND category_id = ?",
            &[name.to_string(), category_id.to_string()],
        )?;
        match found.and_then(|v| v.as_i64()) {
            Some(id) => Ok(id),
            None => ItemQuery::new(self.conn).add(name, Some(category_id), Some(unit)),
        }
    }
}
