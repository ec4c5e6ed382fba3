//! Async wrapper around [`PriceTracker`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all tracker operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! DuckDB queries are CPU-bound but fast, making this approach efficient.
//!
//! # Example
//!
//! ```no_run
//! use price_tracker_sdk::AsyncPriceTracker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tracker = AsyncPriceTracker::builder().in_memory().build().await.unwrap();
//!
//!     // Run any sync tracker method via closure
//!     let comparison = tracker.run(|t| t.price_comparison()).await.unwrap();
//!
//!     // Convenience method for raw SQL
//!     let rows = tracker.sql("SELECT COUNT(*) FROM prices", &[]).await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::models::{ComparisonGroup, DailySummary};
use crate::PriceTracker;

// ---------------------------------------------------------------------------
// AsyncPriceTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPriceTracker`] instance.
pub struct AsyncPriceTrackerBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    seed_defaults: bool,
}

impl Default for AsyncPriceTrackerBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            seed_defaults: false,
        }
    }
}

impl AsyncPriceTrackerBuilder {
    /// Set a custom data directory for the database file.
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
    pub fn seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    /// Build the async tracker, opening the database on the blocking
    /// thread pool so initialization won't block the async event loop.
    pub async fn build(self) -> Result<AsyncPriceTracker> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PriceTracker::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if self.in_memory {
                builder = builder.in_memory();
            }
            builder = builder.seed_defaults(self.seed_defaults);
            let tracker = builder.build()?;
            Ok(AsyncPriceTracker {
                inner: Arc::new(Mutex::new(tracker)),
            })
        })
        .await
        .map_err(|e| TrackerError::InvalidParameter(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPriceTracker
// ---------------------------------------------------------------------------

/// Async wrapper around [`PriceTracker`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`PriceTracker`] is
/// protected by a [`Mutex`] since the DuckDB handle is not `Sync`.
///
/// # Usage
///
/// Use [`run()`](Self::run) to execute any sync tracker method:
///
/// ```no_run
/// # use price_tracker_sdk::AsyncPriceTracker;
/// # async fn example() -> price_tracker_sdk::Result<()> {
/// let tracker = AsyncPriceTracker::builder().in_memory().build().await?;
/// let items = tracker.run(|t| t.items().list()).await?;
/// # Ok(())
/// # }
/// ```
pub struct AsyncPriceTracker {
    inner: Arc<Mutex<PriceTracker>>,
}

impl AsyncPriceTracker {
    /// Create a new builder for configuring the async tracker.
    pub fn builder() -> AsyncPriceTrackerBuilder {
        AsyncPriceTrackerBuilder::default()
    }

    /// Run a sync tracker operation on the blocking thread pool.
    ///
    /// The closure receives a `&PriceTracker` reference and should return
    /// a `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PriceTracker) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tracker = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = tracker
                .lock()
                .map_err(|_| TrackerError::InvalidParameter("tracker lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| TrackerError::InvalidParameter(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`PriceTracker::sql()`].
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |t| t.sql(&query, &params)).await
    }

    /// Today's price submissions, asynchronously.
    pub async fn daily_summary(&self, today: Option<NaiveDate>) -> Result<DailySummary> {
        self.run(move |t| t.daily_summary(today)).await
    }

    /// Cross-store price comparison, asynchronously.
    pub async fn price_comparison(&self) -> Result<Vec<ComparisonGroup>> {
        self.run(|t| t.price_comparison()).await
    }

    /// Close the tracker, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let tracker = self
                .inner
                .lock()
                .map_err(|_| TrackerError::InvalidParameter("tracker lock poisoned".into()))?;
            // Dropping the MutexGuard drops the tracker
            drop(tracker);
            Ok(())
        })
        .await
        .map_err(|e| TrackerError::InvalidParameter(format!("Task join error: {e}")))?
    }
}
