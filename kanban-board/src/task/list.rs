//! ListTasks command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{BoardId, Capability, ColumnId, Task};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's tasks, ordered by column then position.
///
/// `q` matches title or description case-insensitively.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListTasks {
    pub board_id: BoardId,
    pub column_id: Option<ColumnId>,
    pub status: Option<String>,
    pub q: Option<String>,
}

operation!(ListTasks, verb = "list", noun = "tasks", description = "List and filter tasks on a board");

impl ListTasks {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: None,
            status: None,
            q: None,
        }
    }

    pub fn in_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn matching(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListTasks {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let cmd = self.clone();
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let tasks = ctx
                .read(move |tx| {
                    authorize(gate.as_ref(), tx, user, cmd.board_id, Capability::View, "list tasks")?;
                    let query = super::clean(cmd.q.as_deref()).map(|q| q.to_lowercase());
                    let mut stmt = tx.prepare(
                        "SELECT t.id, t.column_id, t.title, t.description, t.priority, t.status,
                                t.due_date, t.created_by, t.position, t.created_at, t.updated_at
                         FROM tasks t JOIN board_columns c ON c.id = t.column_id
                         WHERE c.board_id = ?1
                           AND (?2 IS NULL OR t.column_id = ?2)
                           AND (?3 IS NULL OR t.status = ?3)
                         ORDER BY c.position, c.id, t.position, t.id",
                    )?;
                    let tasks = stmt
                        .query_map(params![cmd.board_id, cmd.column_id, cmd.status], Task::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    tasks
                        .into_iter()
                        .filter(|task| query.as_deref().is_none_or(|q| matches_query(task, q)))
                        .map(|task| super::task_detail(tx, task))
                        .collect::<Result<Vec<_>>>()
                })
                .await?;
            Ok(json!({ "tasks": tasks, "count": tasks.len() }))
        }
        .await;

        unlogged(result)
    }
}

/// SQLite's `lower()` only folds ASCII, so the text match happens here.
fn matches_query(task: &Task, q: &str) -> bool {
    task.title.to_lowercase().contains(q)
        || task
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(q))
}
