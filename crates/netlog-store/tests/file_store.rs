//! On-disk store behaviour

use netlog_store::{HttpLogQuery, HttpLogRecord, HttpLogStore, StatusCodeFilter, StoreConfig};

#[tokio::test]
async fn test_open_creates_directory_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("logs.db");

    let store = HttpLogStore::open(&StoreConfig::with_path(&path)).await.unwrap();

    assert!(path.exists());
    assert!(store.table_exists().await.unwrap());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::with_path(dir.path().join("logs.db"));

    let first_id = {
        let store = HttpLogStore::open(&config).await.unwrap();
        let id = store
            .add(
                &HttpLogRecord::request("q1", "GET", "https://example.com/")
                    .with_headers(["Accept: */*"]),
            )
            .await
            .unwrap();
        store
            .add(&HttpLogRecord::response("q1", 502).with_error("bad gateway"))
            .await
            .unwrap();
        store.pool().close().await;
        id
    };

    // Reopening must not try to recreate the table
    let store = HttpLogStore::open(&config).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);

    let all = store.query(&HttpLogQuery::new(10)).await.unwrap();
    assert_eq!(all[0].id, Some(first_id));
    assert_eq!(all[0].headers, vec!["Accept: */*"]);

    let errors = store
        .query(&HttpLogQuery::new(10).status(StatusCodeFilter::server_error()))
        .await
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_message.as_deref(), Some("bad gateway"));
}

#[tokio::test]
async fn test_new_binds_to_existing_pool() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        wal: false,
        ..StoreConfig::with_path(dir.path().join("logs.db"))
    };
    let opened = HttpLogStore::open(&config).await.unwrap();

    let shared = HttpLogStore::new(opened.pool().clone());
    let id = shared
        .add(&HttpLogRecord::response("q", 204))
        .await
        .unwrap();

    let got = opened.query(&HttpLogQuery::new(1)).await.unwrap();
    assert_eq!(got[0].id, Some(id));
}

#[tokio::test]
async fn test_open_path_with_url_metacharacters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs?dir#1").join("x.db");

    let store = HttpLogStore::open(&StoreConfig::with_path(&path)).await.unwrap();
    store
        .add(&HttpLogRecord::request("q", "GET", "/"))
        .await
        .unwrap();

    assert!(path.exists());
    assert_eq!(store.count().await.unwrap(), 1);
}
