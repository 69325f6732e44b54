use todolist_core::db::{open_db, open_db_in_memory};
use todolist_core::{KeyValueStore, KvError, SqliteKeyValueStore};

#[test]
fn missing_slot_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStore::new(&conn);

    assert!(storage.read("todosDataKey").unwrap().is_none());
}

#[test]
fn write_overwrites_whole_slot() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStore::new(&conn);

    storage.write("todosDataKey", b"[1,2,3]").unwrap();
    storage.write("todosDataKey", b"[]").unwrap();

    assert_eq!(storage.read("todosDataKey").unwrap().unwrap(), b"[]");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn slots_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStore::new(&conn);

    storage.write("a", b"first").unwrap();
    storage.write("b", b"second").unwrap();

    assert_eq!(storage.read("a").unwrap().unwrap(), b"first");
    assert_eq!(storage.read("b").unwrap().unwrap(), b"second");
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStore::new(&conn);

    assert!(matches!(storage.write(" ", b"x"), Err(KvError::InvalidKey)));
    assert!(matches!(storage.read(""), Err(KvError::InvalidKey)));
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteKeyValueStore::new(&conn)
            .write("todosDataKey", b"payload")
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let storage = SqliteKeyValueStore::new(&conn);
    assert_eq!(storage.read("todosDataKey").unwrap().unwrap(), b"payload");
}
