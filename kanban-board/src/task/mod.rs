//! Task commands

mod add;
mod assign;
mod assignees;
mod delete;
mod get;
mod list;
mod mv;
mod reorder;
mod tag;
mod unassign;
mod untag;
mod update;

pub use add::AddTask;
pub use assign::AssignTask;
pub use assignees::ListAssignees;
pub use delete::DeleteTask;
pub use get::GetTask;
pub use list::ListTasks;
pub use mv::MoveTask;
pub use reorder::ReorderTasks;
pub use tag::TagTask;
pub use unassign::UnassignTask;
pub use untag::UntagTask;
pub use update::UpdateTask;

use crate::error::{KanbanError, Result};
use crate::subtask::subtasks_of;
use crate::types::{BoardId, ColumnId, Tag, Task, TaskDetail, TaskId, User};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

const TASK_COLUMNS: &str = "t.id, t.column_id, t.title, t.description, t.priority, t.status,
     t.due_date, t.created_by, t.position, t.created_at, t.updated_at";

pub(crate) fn read_task(conn: &Connection, id: TaskId) -> Result<Task> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1"),
        [id],
        Task::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("task", id))
}

/// The board a task lives on
pub(crate) fn board_of_task(conn: &Connection, id: TaskId) -> Result<BoardId> {
    conn.query_row(
        "SELECT c.board_id FROM tasks t JOIN board_columns c ON c.id = t.column_id WHERE t.id = ?1",
        [id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("task", id))
}

pub(crate) fn touch_task(conn: &Connection, id: TaskId) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET updated_at = ?1 WHERE id = ?2",
        params![Utc::now(), id],
    )?;
    Ok(())
}

pub(crate) fn tags_of_task(conn: &Connection, id: TaskId) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT g.id, g.board_id, g.name, g.color FROM tags g
         JOIN task_tags tt ON tt.tag_id = g.id
         WHERE tt.task_id = ?1 ORDER BY g.name",
    )?;
    let tags = stmt
        .query_map([id], Tag::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

pub(crate) fn assignees_of(conn: &Connection, id: TaskId) -> Result<Vec<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT u.id, u.email, u.name FROM users u
         JOIN task_assignees a ON a.user_id = u.id
         WHERE a.task_id = ?1 ORDER BY a.assigned_at, u.id",
    )?;
    let users = stmt
        .query_map([id], User::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(users)
}

pub(crate) fn task_detail(conn: &Connection, task: Task) -> Result<TaskDetail> {
    Ok(TaskDetail {
        subtasks: subtasks_of(conn, task.id)?,
        tags: tags_of_task(conn, task.id)?,
        assignees: assignees_of(conn, task.id)?,
        task,
    })
}

/// Tasks of one column, in position order, with their details
pub(crate) fn tasks_of_column(conn: &Connection, column: ColumnId) -> Result<Vec<TaskDetail>> {
    let tasks = {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t WHERE t.column_id = ?1 ORDER BY t.position, t.id"
        ))?;
        let rows = stmt.query_map([column], Task::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };
    tasks.into_iter().map(|task| task_detail(conn, task)).collect()
}

/// Trimmed non-empty text, or None
pub(crate) fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
