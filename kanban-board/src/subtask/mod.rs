//! Subtask commands: a task's ordered checklist

mod add;
mod delete;
mod list;
mod mv;
mod reorder;
mod update;

pub use add::AddSubtask;
pub use delete::DeleteSubtask;
pub use list::ListSubtasks;
pub use mv::MoveSubtask;
pub use reorder::ReorderSubtasks;
pub use update::UpdateSubtask;

use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Subtask, SubtaskId, TaskId};
use rusqlite::{Connection, OptionalExtension};

pub(crate) fn read_subtask(conn: &Connection, id: SubtaskId) -> Result<Subtask> {
    conn.query_row(
        "SELECT id, task_id, title, is_done, position FROM subtasks WHERE id = ?1",
        [id],
        Subtask::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("subtask", id))
}

/// Subtasks of a task in position order
pub(crate) fn subtasks_of(conn: &Connection, task: TaskId) -> Result<Vec<Subtask>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, task_id, title, is_done, position FROM subtasks
         WHERE task_id = ?1 ORDER BY position, id",
    )?;
    let subtasks = stmt
        .query_map([task], Subtask::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(subtasks)
}

fn board_of_subtask(conn: &Connection, id: SubtaskId) -> Result<BoardId> {
    conn.query_row(
        "SELECT c.board_id FROM subtasks s
         JOIN tasks t ON t.id = s.task_id
         JOIN board_columns c ON c.id = t.column_id
         WHERE s.id = ?1",
        [id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("subtask", id))
}
