//! The three ordered sibling sets: columns in a board, tasks in a column,
//! subtasks in a task.

use super::SiblingKind;
use crate::error::Result;
use crate::types::{BoardId, ColumnId, SubtaskId, TaskId, UserId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// Columns, ordered within their board
#[derive(Debug, Clone, Copy)]
pub struct ColumnKind;

/// Fields of a new column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewColumn {
    pub name: String,
}

impl SiblingKind for ColumnKind {
    type Id = ColumnId;
    type Parent = BoardId;
    type Payload = NewColumn;

    const RESOURCE: &'static str = "column";
    const PARENT_RESOURCE: &'static str = "board";
    const TABLE: &'static str = "board_columns";
    const PARENT_COLUMN: &'static str = "board_id";
    const ROOT_QUERY: &'static str = "SELECT id FROM boards WHERE id = ?1";

    fn insert(conn: &Connection, parent: BoardId, position: i64, payload: &NewColumn) -> Result<ColumnId> {
        conn.execute(
            "INSERT INTO board_columns (board_id, name, position) VALUES (?1, ?2, ?3)",
            params![parent, payload.name, position],
        )?;
        Ok(ColumnId(conn.last_insert_rowid()))
    }
}

/// Tasks, ordered within their column
#[derive(Debug, Clone, Copy)]
pub struct TaskKind;

/// Fields of a new task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: Option<UserId>,
}

impl SiblingKind for TaskKind {
    type Id = TaskId;
    type Parent = ColumnId;
    type Payload = NewTask;

    const RESOURCE: &'static str = "task";
    const PARENT_RESOURCE: &'static str = "column";
    const TABLE: &'static str = "tasks";
    const PARENT_COLUMN: &'static str = "column_id";
    const ROOT_QUERY: &'static str = "SELECT board_id FROM board_columns WHERE id = ?1";

    fn insert(conn: &Connection, parent: ColumnId, position: i64, payload: &NewTask) -> Result<TaskId> {
        let now = Utc::now();
        conn.execute(
            "INSERT INTO tasks (column_id, title, description, priority, status, due_date,
                                created_by, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            params![
                parent,
                payload.title,
                payload.description,
                payload.priority,
                payload.status,
                payload.due_date,
                payload.created_by,
                position,
                now,
            ],
        )?;
        Ok(TaskId(conn.last_insert_rowid()))
    }
}

/// Subtasks, ordered within their task
#[derive(Debug, Clone, Copy)]
pub struct SubtaskKind;

/// Fields of a new subtask
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubtask {
    pub title: String,
}

impl SiblingKind for SubtaskKind {
    type Id = SubtaskId;
    type Parent = TaskId;
    type Payload = NewSubtask;

    const RESOURCE: &'static str = "subtask";
    const PARENT_RESOURCE: &'static str = "task";
    const TABLE: &'static str = "subtasks";
    const PARENT_COLUMN: &'static str = "task_id";
    const ROOT_QUERY: &'static str = "SELECT c.board_id FROM tasks t
         JOIN board_columns c ON c.id = t.column_id
         WHERE t.id = ?1";

    fn insert(conn: &Connection, parent: TaskId, position: i64, payload: &NewSubtask) -> Result<SubtaskId> {
        conn.execute(
            "INSERT INTO subtasks (task_id, title, is_done, position) VALUES (?1, ?2, 0, ?3)",
            params![parent, payload.title, position],
        )?;
        Ok(SubtaskId(conn.last_insert_rowid()))
    }
}
