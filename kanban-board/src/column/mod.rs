//! Column commands

mod add;
mod delete;
mod list;
mod mv;
mod rename;
mod reorder;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use list::ListColumns;
pub use mv::MoveColumn;
pub use rename::RenameColumn;
pub use reorder::ReorderColumns;

use crate::error::{KanbanError, Result};
use crate::task::tasks_of_column;
use crate::types::{BoardId, Column, ColumnDetail, ColumnId};
use rusqlite::{Connection, OptionalExtension};

pub(crate) fn read_column(conn: &Connection, id: ColumnId) -> Result<Column> {
    conn.query_row(
        "SELECT id, board_id, name, position FROM board_columns WHERE id = ?1",
        [id],
        Column::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("column", id))
}

pub(crate) fn columns_of_board(conn: &Connection, board: BoardId) -> Result<Vec<Column>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, board_id, name, position FROM board_columns
         WHERE board_id = ?1 ORDER BY position, id",
    )?;
    let columns = stmt
        .query_map([board], Column::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Columns of a board with their tasks, all in position order
pub(crate) fn column_details(conn: &Connection, board: BoardId) -> Result<Vec<ColumnDetail>> {
    columns_of_board(conn, board)?
        .into_iter()
        .map(|column| {
            Ok(ColumnDetail {
                tasks: tasks_of_column(conn, column.id)?,
                column,
            })
        })
        .collect()
}
