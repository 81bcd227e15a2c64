//! Column rows as served by `GET /columns`.

use serde::{Deserialize, Serialize};

use crate::id::ColumnId;

/// One row of the `columns` table.
///
/// The data service returns columns already sorted by `column_order`;
/// clients derive their left-to-right render order from response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Stable column id from the seeded set.
    pub id: ColumnId,
    /// Human-readable column title.
    pub title: String,
    /// Left-to-right display position, ascending.
    pub column_order: i64,
}
