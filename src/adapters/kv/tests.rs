use super::{MemoryKvStore, SqliteKvStore};
use crate::core::ports::kv::KvStorePort;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("boxkeep-kv-{}.db", uuid::Uuid::new_v4()))
}

fn cleanup(db_path: &Path) {
    let _ = std::fs::remove_file(db_path);
    let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
    let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
}

#[test]
fn sqlite_get_missing_key_returns_none() {
    let db_path = temp_db_path();
    let store = SqliteKvStore::new(db_path.clone());

    assert_eq!(store.get("absent").expect("get absent"), None);

    cleanup(&db_path);
}

#[test]
fn sqlite_set_overwrites_previous_value() {
    let db_path = temp_db_path();
    let store = SqliteKvStore::new(db_path.clone());

    store.set("inventory", "[]").expect("first write");
    store.set("inventory", r#"[{"id":"box-1"}]"#).expect("overwrite");

    assert_eq!(
        store.get("inventory").expect("read back").as_deref(),
        Some(r#"[{"id":"box-1"}]"#)
    );

    let conn = Connection::open(&db_path).expect("open sqlite");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(rows, 1);

    cleanup(&db_path);
}

#[test]
fn sqlite_values_survive_reopen() {
    let db_path = temp_db_path();
    SqliteKvStore::new(db_path.clone())
        .set("k", "v")
        .expect("write");

    let reopened = SqliteKvStore::new(db_path.clone());
    assert_eq!(reopened.db_path(), db_path.as_path());
    assert_eq!(reopened.get("k").expect("read").as_deref(), Some("v"));

    cleanup(&db_path);
}

#[test]
fn sqlite_open_fails_for_missing_directory() {
    let db_path = std::env::temp_dir()
        .join(format!("boxkeep-missing-{}", uuid::Uuid::new_v4()))
        .join("nested")
        .join("kv.db");
    let store = SqliteKvStore::new(db_path);

    assert!(store.get("k").is_err());
}

#[test]
fn memory_store_keeps_keys_separate() {
    let store = MemoryKvStore::new();
    store.set("a", "1").expect("set a");
    store.set("b", "2").expect("set b");
    store.set("a", "3").expect("overwrite a");

    assert_eq!(store.get("a").expect("get a").as_deref(), Some("3"));
    assert_eq!(store.get("b").expect("get b").as_deref(), Some("2"));
    assert_eq!(store.get("c").expect("get c"), None);
}
