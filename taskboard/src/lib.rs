//! Taskboard — kanban board client library.
//!
//! The board store keeps a normalized in-memory board (tasks, columns,
//! column order, comments) consistent with a remote REST data service
//! across creates, edits, deletes, comments, and drag-and-drop moves.

pub mod board;
pub mod config;
pub mod remote;
