//! Netlog Store - HTTP log persistence
//!
//! This crate records captured HTTP request/response observations in SQLite:
//! - Record: the stored log entry model
//! - Filter: status code range filtering
//! - Store: schema, insert, clear-all and filtered/paginated search

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod store;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use filter::StatusCodeFilter;
pub use record::{HttpLogRecord, QueryType};
pub use store::{HttpLogQuery, HttpLogRepository, HttpLogStore, SelectStatement, TABLE_NAME};
