//! Property-based wire-shape tests for the row types.
//!
//! Uses proptest to verify:
//! 1. Any valid row survives a JSON serialize → deserialize round-trip.
//! 2. Id newtypes are transparent: they serialize as bare JSON strings.
//! 3. Optional task fields round-trip `None` as JSON `null`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use taskboard_proto::{ColumnId, ColumnRow, CommentId, CommentRow, TaskId, TaskPatch, TaskRow};

// --- Strategies ---

/// Strategy for id strings: non-empty, no control characters.
fn arb_id_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,40}"
}

fn arb_task_id() -> impl Strategy<Value = TaskId> {
    arb_id_text().prop_map(|s| TaskId::new(format!("task-{s}")))
}

fn arb_column_id() -> impl Strategy<Value = ColumnId> {
    arb_id_text().prop_map(ColumnId::new)
}

fn arb_comment_id() -> impl Strategy<Value = CommentId> {
    arb_id_text().prop_map(|s| CommentId::new(format!("comment-{s}")))
}

/// Strategy for text fields: arbitrary printable content.
fn arb_text() -> impl Strategy<Value = String> {
    "[^\\p{Cc}]{1,200}"
}

/// Strategy for calendar dates within the supported range.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_filter_map("valid ymd", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

/// Strategy for timestamps with whole-second precision (the wire format
/// is RFC 3339 and sub-second precision is not required to survive).
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn arb_task_row() -> impl Strategy<Value = TaskRow> {
    (
        arb_task_id(),
        arb_text(),
        prop::option::of(arb_text()),
        prop::option::of(arb_date()),
        arb_column_id(),
    )
        .prop_map(|(id, content, assigned_to, due_date, column_id)| TaskRow {
            id,
            content,
            assigned_to,
            due_date,
            column_id,
        })
}

fn arb_column_row() -> impl Strategy<Value = ColumnRow> {
    (arb_column_id(), arb_text(), 1i64..100).prop_map(|(id, title, column_order)| ColumnRow {
        id,
        title,
        column_order,
    })
}

fn arb_comment_row() -> impl Strategy<Value = CommentRow> {
    (arb_comment_id(), arb_task_id(), arb_text(), arb_timestamp()).prop_map(
        |(id, task_id, text, created_at)| CommentRow {
            id,
            task_id,
            text,
            created_at,
        },
    )
}

// --- Property tests ---

proptest! {
    /// Any valid TaskRow survives a JSON round-trip.
    #[test]
    fn task_row_round_trip(row in arb_task_row()) {
        let json = serde_json::to_string(&row).expect("serialize should succeed");
        let decoded: TaskRow = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(row, decoded);
    }

    /// Any valid ColumnRow survives a JSON round-trip.
    #[test]
    fn column_row_round_trip(row in arb_column_row()) {
        let json = serde_json::to_string(&row).expect("serialize should succeed");
        let decoded: ColumnRow = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(row, decoded);
    }

    /// Any valid CommentRow survives a JSON round-trip.
    #[test]
    fn comment_row_round_trip(row in arb_comment_row()) {
        let json = serde_json::to_string(&row).expect("serialize should succeed");
        let decoded: CommentRow = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(row, decoded);
    }

    /// The patch derived from any row carries the row's mutable fields
    /// and survives its own JSON round-trip.
    #[test]
    fn patch_round_trip_matches_row(row in arb_task_row()) {
        let patch = row.to_patch();
        prop_assert_eq!(&patch.content, &row.content);
        prop_assert_eq!(&patch.column_id, &row.column_id);

        let json = serde_json::to_string(&patch).expect("serialize should succeed");
        let decoded: TaskPatch = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(patch, decoded);
    }

    /// Id newtypes serialize as bare strings, never wrapped in an object.
    #[test]
    fn ids_are_transparent_strings(row in arb_task_row()) {
        let json = serde_json::to_value(&row).expect("serialize should succeed");
        prop_assert!(json["id"].is_string());
        prop_assert!(json["column_id"].is_string());
        prop_assert_eq!(json["id"].as_str(), Some(row.id.as_str()));
    }

    /// Absent optional fields appear as explicit JSON nulls, and nulls
    /// deserialize back to None.
    #[test]
    fn optional_fields_round_trip_as_null(id in arb_task_id(), column_id in arb_column_id()) {
        let row = TaskRow {
            id,
            content: "content".to_string(),
            assigned_to: None,
            due_date: None,
            column_id,
        };
        let json = serde_json::to_value(&row).expect("serialize should succeed");
        prop_assert!(json["assigned_to"].is_null());
        prop_assert!(json["due_date"].is_null());

        let decoded: TaskRow = serde_json::from_value(json).expect("deserialize should succeed");
        prop_assert!(decoded.assigned_to.is_none());
    }
}
