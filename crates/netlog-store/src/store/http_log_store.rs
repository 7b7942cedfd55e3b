//! HttpLogStore - SQLite-based HTTP log storage

use super::helpers::row_to_record;
use super::query::{BindValue, HttpLogQuery, SelectStatement};
use super::schema::TABLE_NAME;
use super::traits::HttpLogRepository;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::record::HttpLogRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info, instrument, warn};

/// Store for persisting captured HTTP exchanges to SQLite
#[derive(Clone)]
pub struct HttpLogStore {
    pub(crate) pool: SqlitePool,
}

impl HttpLogStore {
    /// Create a store over a pool owned by the caller
    ///
    /// The schema is not touched; call [`Self::create_schema`] or
    /// [`Self::ensure_schema`] as needed.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database described by `config`
    ///
    /// Creates the log table if it is missing.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let db_path = config.resolved_db_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("failed to create directory: {e}")))?;
        }

        // Path goes in as a filename, not a URL, so `?` and `#` stay literal
        let mut options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        if config.wal {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        info!("HTTP log store initialized at {}", db_path.display());
        Ok(store)
    }

    /// Create a new in-memory store with the schema in place
    ///
    /// Meant for tests. The database lives in the pool's single connection
    /// and is gone once the store and its clones are dropped.
    pub async fn in_memory() -> Result<Self> {
        // Never recycle the connection; a fresh one would be an empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.create_schema().await?;

        debug!("In-memory HTTP log store initialized");
        Ok(store)
    }

    /// Get a reference to the underlying connection pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert a record and return its assigned identifier
    ///
    /// Any `id` already set on the record is ignored.
    #[instrument(skip(self, record), fields(query_id = %record.query_id, query_type = %record.query_type))]
    pub async fn add(&self, record: &HttpLogRecord) -> Result<i64> {
        let headers = serde_json::to_string(&record.headers)?;

        let result = sqlx::query(
            r#"
            INSERT INTO net_log_data (
                query_id, query_type, method, code, message, full_status,
                ip, full_ip_address, time, duration, request_content_type,
                body_size, port, url, body, error_message, headers
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17
            )
            "#,
        )
        .bind(&record.query_id)
        .bind(record.query_type.as_str())
        .bind(&record.method)
        .bind(record.code.filter(|c| *c != 0).map(i64::from))
        .bind(&record.message)
        .bind(&record.full_status)
        .bind(&record.ip)
        .bind(&record.full_ip_address)
        .bind(&record.time)
        .bind(&record.duration)
        .bind(&record.request_content_type)
        .bind(&record.body_size)
        .bind(&record.port)
        .bind(&record.url)
        .bind(&record.body)
        .bind(&record.error_message)
        .bind(headers)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Added log record {}", id);
        Ok(id)
    }

    /// Delete every stored record
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM net_log_data")
            .execute(&self.pool)
            .await?;

        debug!("Cleared {} log records", result.rows_affected());
        Ok(())
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM net_log_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get::<i64, _>("cnt")? as u64)
    }

    /// Search records, ordered by identifier ascending
    ///
    /// A row that cannot be decoded fails the whole query with
    /// [`Error::RecordCorruption`]; rows are never skipped.
    #[instrument(skip(self, query), fields(limit = query.limit, offset = ?query.offset))]
    pub async fn query(&self, query: &HttpLogQuery) -> Result<Vec<HttpLogRecord>> {
        let stmt = SelectStatement::build(query);

        let mut q = sqlx::query(&stmt.sql);
        for value in &stmt.binds {
            q = match value {
                BindValue::Int(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }

        let rows = q.fetch_all(&self.pool).await?;
        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| warn!("Aborting {TABLE_NAME} query: {e}"))?;

        debug!("Query returned {} log records", records.len());
        Ok(records)
    }
}

#[async_trait::async_trait]
impl HttpLogRepository for HttpLogStore {
    async fn add(&self, record: &HttpLogRecord) -> Result<i64> {
        HttpLogStore::add(self, record).await
    }

    async fn clear_all(&self) -> Result<()> {
        HttpLogStore::clear_all(self).await
    }

    async fn query(&self, query: &HttpLogQuery) -> Result<Vec<HttpLogRecord>> {
        HttpLogStore::query(self, query).await
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
