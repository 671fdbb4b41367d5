//! Integration tests for `SqliteContextStore`.

use toolgate_registry::ContextStore;
use toolgate_store_sqlite::SqliteContextStore;

#[tokio::test]
async fn set_then_get() {
    let store = SqliteContextStore::open_in_memory().expect("open");
    store.set("unit-test-key", "hello-world").await.expect("set");
    let value = store.get("unit-test-key").await.expect("get");
    assert_eq!(value.as_deref(), Some("hello-world"));
}

#[tokio::test]
async fn missing_key_is_none() {
    let store = SqliteContextStore::open_in_memory().expect("open");
    assert_eq!(store.get("absent").await.expect("get"), None);
}

#[tokio::test]
async fn set_overwrites_repeatedly() {
    let store = SqliteContextStore::open_in_memory().expect("open");
    for value in ["a", "", "ünïcødé", "multi\nline", "a"] {
        store.set("k", value).await.expect("set");
        assert_eq!(store.get("k").await.expect("get").as_deref(), Some(value));
    }
}

#[tokio::test]
async fn namespaces_do_not_collide() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ctx.db");
    let path = path.to_str().expect("utf8");

    let a = SqliteContextStore::open(path).expect("a").with_namespace("team-a");
    let b = SqliteContextStore::open(path).expect("b").with_namespace("team-b");
    a.set("incident", "INC-1").await.expect("set a");

    assert_eq!(b.get("incident").await.expect("get b"), None);
    assert_eq!(a.get("incident").await.expect("get a").as_deref(), Some("INC-1"));
}
