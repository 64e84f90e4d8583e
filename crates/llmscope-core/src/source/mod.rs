//! Data sources - producers of log entry collections
//!
//! A data source stands between the query layer and wherever entries come
//! from. Sources may pre-filter by the equality and date fields of a
//! [`FilterCriteria`]; free-text search always happens client-side in
//! [`crate::query`].

mod fixed;
mod mock;

pub use fixed::StaticDataSource;
pub use mock::{MockDataSource, KNOWN_MODELS, KNOWN_STATUSES};

use crate::error::Result;
use crate::models::{FilterCriteria, LogEntry};

/// Producer of log entries
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch up to `count` entries without conditions
    async fn fetch_entries(&self, count: usize) -> Result<Vec<LogEntry>>;

    /// Fetch entries pre-filtered by the equality and date fields of `filter`
    ///
    /// Implementations ignore `filter.search_query`.
    async fn fetch_filtered(&self, filter: &FilterCriteria, count: usize) -> Result<Vec<LogEntry>>;
}
