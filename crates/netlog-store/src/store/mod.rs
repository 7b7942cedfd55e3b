//! Store - HTTP log persistence using SQLite
//!
//! This module provides the storage layer for captured HTTP exchanges.
//! It uses sqlx for async SQLite access over a single table.

mod helpers;
mod http_log_store;
mod query;
mod schema;
mod traits;


pub use helpers::{default_data_dir, default_db_path};
pub use http_log_store::HttpLogStore;
pub use query::{BindValue, HttpLogQuery, SelectStatement};
pub use schema::TABLE_NAME;
pub use traits::HttpLogRepository;
