//! Taskboard data service library.
//!
//! Exposes the REST server for use in tests and embedding. The service is
//! persistence only: list and single-row create/update/delete over the
//! `columns`, `tasks`, and `comments` tables. No board logic lives here.

pub mod config;
pub mod server;
pub mod store;
