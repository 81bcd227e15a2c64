//! Integration tests for board load and reconciliation against a real
//! data service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskboard::board::BoardStore;
use taskboard::remote::http::HttpRemote;
use taskboard_proto::{ColumnId, ColumnRow, TaskId, TaskRow};
use taskboard_server::server;
use taskboard_server::store::TableStore;

/// Starts a data service on an OS-assigned port and returns a board store
/// pointed at it, plus the backing table store for direct seeding.
async fn start_store() -> (BoardStore<HttpRemote>, Arc<TableStore>) {
    let tables = Arc::new(TableStore::new());
    let (addr, _handle) = server::start_server_with_store("127.0.0.1:0", Arc::clone(&tables))
        .await
        .expect("failed to start test server");
    let remote = HttpRemote::new(&format!("http://{addr}"));
    (BoardStore::new(remote, ColumnId::new("todo")), tables)
}

fn seed_row(id: &str, column: &str) -> TaskRow {
    TaskRow {
        id: TaskId::new(id),
        content: format!("content {id}"),
        assigned_to: None,
        due_date: None,
        column_id: ColumnId::new(column),
    }
}

#[tokio::test]
async fn load_builds_board_with_seeded_columns() {
    let (mut store, _tables) = start_store().await;
    store.load().await.unwrap();

    let order: Vec<&str> = store
        .board()
        .column_order
        .iter()
        .map(ColumnId::as_str)
        .collect();
    assert_eq!(order, vec!["todo", "inProgress", "done"]);
    assert!(store.board().tasks.is_empty());
}

#[tokio::test]
async fn load_places_persisted_tasks_in_columns() {
    let (mut store, tables) = start_store().await;
    tables.insert_task(seed_row("task-1", "todo")).await.unwrap();
    tables.insert_task(seed_row("task-2", "done")).await.unwrap();

    store.load().await.unwrap();

    assert_eq!(store.board().tasks.len(), 2);
    assert_eq!(
        store.board().columns[&ColumnId::new("todo")].task_ids,
        vec![TaskId::new("task-1")]
    );
    assert_eq!(
        store.board().columns[&ColumnId::new("done")].task_ids,
        vec![TaskId::new("task-2")]
    );
    assert!(store.board().membership_invariant_holds());
}

#[tokio::test]
async fn load_twice_with_unchanged_remote_is_idempotent() {
    let (mut store, tables) = start_store().await;
    tables.insert_task(seed_row("task-1", "todo")).await.unwrap();

    store.load().await.unwrap();
    let first = store.board().clone();
    store.load().await.unwrap();
    assert_eq!(store.board(), &first);
}

#[tokio::test]
async fn load_orphans_task_referencing_unknown_column() {
    let (mut store, tables) = start_store().await;
    tables
        .insert_task(seed_row("task-stray", "archived"))
        .await
        .unwrap();

    store.load().await.unwrap();

    let id = TaskId::new("task-stray");
    assert!(store.board().tasks.contains_key(&id));
    assert!(store
        .board()
        .columns
        .values()
        .all(|c| !c.task_ids.contains(&id)));
    assert!(store.board().membership_invariant_holds());
}

#[tokio::test]
async fn load_against_unreachable_service_fails_clean() {
    // Seed a working board first, then repoint the load at a dead port.
    let (mut store, tables) = start_store().await;
    tables.insert_task(seed_row("task-1", "todo")).await.unwrap();
    store.load().await.unwrap();
    assert_eq!(store.board().tasks.len(), 1);

    let dead = HttpRemote::new("http://127.0.0.1:9");
    let mut store = BoardStore::new(dead, ColumnId::new("todo"));
    assert!(store.load().await.is_err());
    assert!(store.board().tasks.is_empty());
    assert!(store.board().columns.is_empty());
}

#[tokio::test]
async fn load_sees_columns_in_display_order_even_if_seeded_unsorted() {
    let tables = Arc::new(TableStore::with_columns(vec![
        ColumnRow {
            id: ColumnId::new("second"),
            title: "Second".to_string(),
            column_order: 2,
        },
        ColumnRow {
            id: ColumnId::new("first"),
            title: "First".to_string(),
            column_order: 1,
        },
    ]));
    let (addr, _handle) = server::start_server_with_store("127.0.0.1:0", Arc::clone(&tables))
        .await
        .expect("failed to start test server");

    let remote = HttpRemote::new(&format!("http://{addr}"));
    let mut store = BoardStore::new(remote, ColumnId::new("first"));
    store.load().await.unwrap();

    let order: Vec<&str> = store
        .board()
        .column_order
        .iter()
        .map(ColumnId::as_str)
        .collect();
    assert_eq!(order, vec!["first", "second"]);
}
