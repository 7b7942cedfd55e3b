//! Helper functions for store module

use crate::error::{Error, Result};
use crate::record::{HttpLogRecord, QueryType};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Convert a SQLite row to an HttpLogRecord
///
/// A stored code of `0` reads back as absent.
pub(crate) fn row_to_record(row: &SqliteRow) -> Result<HttpLogRecord> {
    let id: i64 = row.try_get("_id")?;
    let query_type_str: Option<String> = row.try_get("query_type")?;
    let code: Option<i64> = row.try_get("code")?;
    let headers_str: Option<String> = row.try_get("headers")?;

    let corrupt = move |reason: String| Error::RecordCorruption { id, reason };

    let query_type: QueryType = query_type_str
        .ok_or_else(|| corrupt("missing query type".to_string()))?
        .parse()
        .map_err(corrupt)?;
    let code = match code {
        None | Some(0) => None,
        Some(c) => Some(u16::try_from(c).map_err(|_| corrupt(format!("invalid code: {c}")))?),
    };
    let headers: Vec<String> = match headers_str {
        Some(s) => serde_json::from_str(&s).map_err(|e| corrupt(format!("invalid headers: {e}")))?,
        None => Vec::new(),
    };

    Ok(HttpLogRecord {
        id: Some(id),
        query_id: row.try_get::<Option<String>, _>("query_id")?.unwrap_or_default(),
        query_type,
        method: row.try_get("method")?,
        code,
        message: row.try_get("message")?,
        full_status: row.try_get("full_status")?,
        ip: row.try_get("ip")?,
        full_ip_address: row.try_get("full_ip_address")?,
        time: row.try_get("time")?,
        duration: row.try_get("duration")?,
        request_content_type: row.try_get("request_content_type")?,
        body_size: row.try_get("body_size")?,
        port: row.try_get("port")?,
        url: row.try_get("url")?,
        body: row.try_get("body")?,
        error_message: row.try_get("error_message")?,
        headers,
    })
}

/// Get the default data directory for netlog
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".netlog"))
        .unwrap_or_else(|| std::path::PathBuf::from(".netlog"))
}

/// Get the default database path
pub fn default_db_path() -> std::path::PathBuf {
    default_data_dir().join("netlog.db")
}
