//! Drag-and-drop over a live data service: moves persist, failed
//! persistence leaves membership intact, and the gesture state always
//! resets.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskboard::board::{BoardStore, DragState, DropOutcome, NewTask};
use taskboard::remote::http::HttpRemote;
use taskboard_proto::ColumnId;
use taskboard_server::server;
use taskboard_server::store::TableStore;

async fn start_store() -> (BoardStore<HttpRemote>, String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = server::start_server_with_store("127.0.0.1:0", Arc::new(TableStore::new()))
        .await
        .expect("failed to start test server");
    let base = format!("http://{addr}");
    let mut store = BoardStore::new(HttpRemote::new(&base), ColumnId::new("todo"));
    store.load().await.expect("initial load failed");
    (store, base, handle)
}

fn todo() -> ColumnId {
    ColumnId::new("todo")
}

fn done() -> ColumnId {
    ColumnId::new("done")
}

fn new_task(content: &str) -> NewTask {
    NewTask {
        content: content.to_string(),
        ..NewTask::default()
    }
}

#[tokio::test]
async fn move_is_visible_to_a_fresh_load() {
    let (mut store, base, _handle) = start_store().await;
    let id = store.create_task(new_task("Ship it")).await.unwrap();

    store.drag_start(id.clone());
    store.drag_over(done());
    assert_eq!(store.drop_on(done()).await.unwrap(), DropOutcome::Moved);

    let mut other = BoardStore::new(HttpRemote::new(&base), ColumnId::new("todo"));
    other.load().await.unwrap();
    assert_eq!(other.board().tasks[&id].column_id, done());
    assert!(other.board().columns[&done()].task_ids.contains(&id));
    assert!(!other.board().columns[&todo()].task_ids.contains(&id));
}

#[tokio::test]
async fn move_preserves_content_and_comments() {
    let (mut store, base, _handle) = start_store().await;
    let id = store.create_task(new_task("Ship it")).await.unwrap();
    store.add_comment(&id, "almost there").await.unwrap();

    store.drag_start(id.clone());
    store.drop_on(done()).await.unwrap();

    let mut other = BoardStore::new(HttpRemote::new(&base), ColumnId::new("todo"));
    other.load().await.unwrap();
    let task = &other.board().tasks[&id];
    assert_eq!(task.content, "Ship it");
    assert_eq!(task.comments.len(), 1);
}

#[tokio::test]
async fn drop_onto_source_column_keeps_board_consistent() {
    let (mut store, _base, _handle) = start_store().await;
    let id = store.create_task(new_task("Stay put")).await.unwrap();

    store.drag_start(id.clone());
    assert_eq!(store.drop_on(todo()).await.unwrap(), DropOutcome::Moved);

    // Still listed exactly once, in the same column.
    assert_eq!(store.board().columns[&todo()].task_ids, vec![id]);
    assert!(store.board().membership_invariant_holds());
}

#[tokio::test]
async fn tasks_moving_between_columns_keep_relative_order() {
    let (mut store, _base, _handle) = start_store().await;
    let a = store.create_task(new_task("A")).await.unwrap();
    let b = store.create_task(new_task("B")).await.unwrap();
    let c = store.create_task(new_task("C")).await.unwrap();

    store.drag_start(b.clone());
    store.drop_on(done()).await.unwrap();
    store.drag_start(a.clone());
    store.drop_on(done()).await.unwrap();

    // Destination appends in drop order; source keeps its remainder.
    assert_eq!(store.board().columns[&done()].task_ids, vec![b, a]);
    assert_eq!(store.board().columns[&todo()].task_ids, vec![c]);
}

#[tokio::test]
async fn failed_persistence_leaves_membership_and_clears_gesture() {
    let (mut store, _base, handle) = start_store().await;
    let id = store.create_task(new_task("Ship it")).await.unwrap();

    // Kill the service so the move cannot persist.
    handle.abort();
    let _ = handle.await;

    store.drag_start(id.clone());
    store.drag_over(done());
    assert!(store.drop_on(done()).await.is_err());

    // Membership untouched, gesture reset anyway.
    assert!(store.board().columns[&todo()].task_ids.contains(&id));
    assert_eq!(store.board().tasks[&id].column_id, todo());
    assert!(store.board().membership_invariant_holds());
    assert_eq!(store.drag_state(), &DragState::Idle);
}

#[tokio::test]
async fn drag_over_without_active_drag_is_ignored() {
    let (mut store, _base, _handle) = start_store().await;
    store.drag_over(done());
    assert_eq!(store.drag_state(), &DragState::Idle);
}
