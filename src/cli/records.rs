//! Record CLI commands
//!
//! `netlog add <FILE>`  — store records from JSON
//! `netlog query ...`   — search and print records as JSON

use super::{open_store, QueryArgs};
use anyhow::{Context, Result};
use netlog_store::{HttpLogQuery, HttpLogRecord, StatusCodeFilter, StoreConfig};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One record or a list of records
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Many(Vec<HttpLogRecord>),
    One(Box<HttpLogRecord>),
}

fn parse_records(input: &str) -> Result<Vec<HttpLogRecord>> {
    let parsed: RecordInput =
        serde_json::from_str(input).context("Input is not a record or a list of records")?;
    Ok(match parsed {
        RecordInput::Many(records) => records,
        RecordInput::One(record) => vec![*record],
    })
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
    }
}

fn build_query(args: QueryArgs) -> HttpLogQuery {
    let mut query = HttpLogQuery::new(args.limit).only_errors(args.errors);
    if let Some(offset) = args.offset {
        query = query.offset(offset);
    }
    query = query.status(StatusCodeFilter {
        min: args.min_code,
        max: args.max_code,
    });
    if let Some(text) = args.search {
        query = query.search(text);
    }
    query
}

pub async fn add(config: &StoreConfig, file: &Path) -> Result<()> {
    let records = parse_records(&read_input(file)?)?;
    let store = open_store(config).await?;

    for record in &records {
        let id = store.add(record).await?;
        println!("{id}");
    }
    debug!("Added {} records", records.len());
    Ok(())
}

pub async fn query(config: &StoreConfig, args: QueryArgs) -> Result<()> {
    let store = open_store(config).await?;
    let records = store.query(&build_query(args)).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> QueryArgs {
        QueryArgs {
            limit: 10,
            offset: None,
            min_code: None,
            max_code: None,
            errors: false,
            search: None,
        }
    }

    #[test]
    fn test_parse_single_and_many() {
        let one = parse_records(r#"{"query_id":"a","query_type":"REQUEST"}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_records(
            r#"[{"query_id":"a","query_type":"REQUEST"},{"query_id":"a","query_type":"RESPONSE","code":200}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].code, Some(200));
    }

    #[tokio::test]
    async fn test_add_then_query_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::with_path(dir.path().join("cli.db"));
        let input = dir.path().join("records.json");
        std::fs::write(
            &input,
            r#"[
                {"query_id":"r1","query_type":"REQUEST","method":"GET","url":"/health","headers":["Accept: */*"]},
                {"query_id":"r1","query_type":"RESPONSE","code":503,"error_message":"upstream timeout"}
            ]"#,
        )
        .unwrap();

        add(&config, &input).await.unwrap();
        query(
            &config,
            QueryArgs {
                errors: true,
                ..args()
            },
        )
        .await
        .unwrap();

        let store = netlog_store::HttpLogStore::open(&config).await.unwrap();
        let stored = store
            .query(&build_query(QueryArgs {
                search: Some("timeout".into()),
                ..args()
            }))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].code, Some(503));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::with_path(dir.path().join("cli.db"));
        let input = dir.path().join("bad.json");
        std::fs::write(&input, "{not json").unwrap();

        assert!(add(&config, &input).await.is_err());
        assert!(add(&config, &dir.path().join("missing.json")).await.is_err());
        assert!(!config.resolved_db_path().exists());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_records("[1, 2]").is_err());
    }

    #[test]
    fn test_build_query_without_bounds_has_no_status_condition() {
        let query = build_query(args());
        assert!(!query.status_filter.unwrap().has_condition());
        assert_eq!(query.offset, None);
    }

    #[test]
    fn test_build_query_maps_flags() {
        let query = build_query(QueryArgs {
            offset: Some(4),
            min_code: Some(500),
            errors: true,
            search: Some("timeout".into()),
            ..args()
        });
        assert_eq!(query.offset, Some(4));
        assert!(query.only_errors);
        assert_eq!(query.status_filter.unwrap().bounds(), (500, u16::MAX));
        assert_eq!(query.search.as_deref(), Some("timeout"));
    }
}
