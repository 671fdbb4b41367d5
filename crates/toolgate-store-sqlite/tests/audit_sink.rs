//! Integration tests for `SqliteAuditSink`.

use std::sync::Arc;

use toolgate_registry::{AuditRecord, AuditSink};
use toolgate_store_sqlite::SqliteAuditSink;

fn record(method: &str, n: usize) -> AuditRecord {
    AuditRecord::new(
        method,
        format!(r#"{{"version":"2.0","id":{n},"method":"{method}"}}"#),
        format!(r#"{{"version":"2.0","id":{n},"result":[]}}"#),
    )
}

#[tokio::test]
async fn append_and_read_back() {
    let sink = SqliteAuditSink::open_in_memory().expect("open");
    sink.append(&record("tools.list", 1)).await.expect("append");

    let rows = sink.recent(10, None).expect("recent");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.method, "tools.list");
    assert!(rows[0].record.request.contains("\"id\":1"));
    assert!(rows[0].record.timestamp_ms > 0);
}

#[tokio::test]
async fn recent_is_newest_first_and_limited() {
    let sink = SqliteAuditSink::open_in_memory().expect("open");
    for n in 0..5 {
        sink.append(&record("tools.call", n)).await.expect("append");
    }
    let rows = sink.recent(2, None).expect("recent");
    assert_eq!(rows.len(), 2);
    assert!(rows[0].id > rows[1].id);
    assert!(rows[0].record.request.contains("\"id\":4"));
}

#[tokio::test]
async fn recent_filters_by_method() {
    let sink = SqliteAuditSink::open_in_memory().expect("open");
    sink.append(&record("tools.list", 1)).await.expect("a");
    sink.append(&record("tools.call", 2)).await.expect("b");
    sink.append(&record("tools.call", 3)).await.expect("c");

    let rows = sink.recent(10, Some("tools.call")).expect("recent");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.record.method == "tools.call"));
}

#[tokio::test]
async fn concurrent_appends_are_all_kept() {
    let sink = Arc::new(SqliteAuditSink::open_in_memory().expect("open"));
    let mut tasks = Vec::new();
    for worker in 0..4 {
        let sink = sink.clone();
        tasks.push(tokio::spawn(async move {
            for n in 0..25 {
                sink.append(&record("tools.call", worker * 100 + n))
                    .await
                    .expect("append");
            }
        }));
    }
    for t in tasks {
        t.await.expect("join");
    }
    assert_eq!(sink.count().expect("count"), 100);
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.db");
    let path = path.to_str().expect("utf8");

    {
        let sink = SqliteAuditSink::open(path).expect("open");
        sink.append(&record("context.set", 1)).await.expect("append");
    }

    let reopened = SqliteAuditSink::open(path).expect("reopen");
    assert_eq!(reopened.count().expect("count"), 1);
}
