//! Column types

use super::ids::{BoardId, ColumnId};
use super::task::TaskDetail;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A column defines a workflow stage. `position` is dense `1..N` per board
/// after any reorder or move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    pub position: i64,
}

impl Column {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            board_id: row.get("board_id")?,
            name: row.get("name")?,
            position: row.get("position")?,
        })
    }
}

/// A column with the number of tasks it holds
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    #[serde(flatten)]
    pub column: Column,
    pub task_count: i64,
}

/// A column with its tasks in order
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDetail {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<TaskDetail>,
}
