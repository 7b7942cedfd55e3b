//! Table layout and creation

use super::HttpLogStore;
use crate::error::{Error, Result};
use sqlx::Row;
use tracing::{debug, instrument};

/// Name of the single log table
pub const TABLE_NAME: &str = "net_log_data";

pub(crate) const SELECT_COLUMNS: &str = "_id, query_id, query_type, method, code, message, \
     full_status, ip, full_ip_address, time, duration, request_content_type, body_size, \
     port, url, body, error_message, headers";

/// Columns matched by free-text search, in match order
pub(crate) const SEARCH_COLUMNS: [&str; 16] = [
    "query_id",
    "method",
    "time",
    "code",
    "message",
    "full_status",
    "full_ip_address",
    "request_content_type",
    "port",
    "ip",
    "url",
    "body_size",
    "duration",
    "body",
    "error_message",
    "headers",
];

impl HttpLogStore {
    /// Create the log table
    ///
    /// Fails with [`Error::Schema`] if the table already exists.
    #[instrument(skip(self))]
    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE net_log_data (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                query_id TEXT,
                method TEXT,
                code INTEGER,
                message TEXT,
                full_status TEXT,
                full_ip_address TEXT,
                query_type TEXT,
                time TEXT,
                duration TEXT,
                request_content_type TEXT,
                body_size TEXT,
                port TEXT,
                ip TEXT,
                url TEXT,
                body TEXT,
                error_message TEXT,
                headers TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(Error::Schema)?;

        debug!("Created table {TABLE_NAME}");
        Ok(())
    }

    /// Whether the log table is present
    pub async fn table_exists(&self) -> Result<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(TABLE_NAME)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get::<i64, _>("cnt")? > 0)
    }

    /// Create the log table unless it is already there
    pub async fn ensure_schema(&self) -> Result<()> {
        if self.table_exists().await? {
            debug!("Table {TABLE_NAME} already present");
            return Ok(());
        }
        self.create_schema().await
    }
}
