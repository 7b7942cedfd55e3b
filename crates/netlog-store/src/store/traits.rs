//! Trait for HTTP log storage backends

use super::query::HttpLogQuery;
use crate::error::Result;
use crate::record::HttpLogRecord;

/// Trait for HTTP log storage backends
///
/// Lets the capturing and presentation layers depend on the operations
/// rather than on the SQLite store.
#[async_trait::async_trait]
pub trait HttpLogRepository: Send + Sync {
    /// Persist a record and return its identifier
    async fn add(&self, record: &HttpLogRecord) -> Result<i64>;

    /// Remove every record
    async fn clear_all(&self) -> Result<()>;

    /// Filtered, paginated search
    async fn query(&self, query: &HttpLogQuery) -> Result<Vec<HttpLogRecord>>;

    /// Get the backend name (for logging)
    fn name(&self) -> &str;
}
