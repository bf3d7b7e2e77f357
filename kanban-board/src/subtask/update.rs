//! UpdateSubtask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::task::touch_task;
use crate::types::{Capability, SubtaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename a subtask or toggle its done flag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateSubtask {
    pub id: SubtaskId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

operation!(UpdateSubtask, verb = "update", noun = "subtask", description = "Update a subtask");

impl UpdateSubtask {
    pub fn new(id: impl Into<SubtaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            is_done: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.is_done = Some(done);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateSubtask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let title = match cmd.title.as_deref().map(str::trim) {
                Some("") => return Err(KanbanError::validation("title", "title must not be blank")),
                other => other.map(String::from),
            };
            let gate = ctx.gate();

            let subtask = ctx
                .write(move |tx| {
                    let board = super::board_of_subtask(tx, cmd.id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "update subtask")?;
                    let mut subtask = super::read_subtask(tx, cmd.id)?;
                    if let Some(title) = title {
                        subtask.title = title;
                    }
                    if let Some(done) = cmd.is_done {
                        subtask.is_done = done;
                    }
                    tx.execute(
                        "UPDATE subtasks SET title = ?1, is_done = ?2 WHERE id = ?3",
                        params![subtask.title, subtask.is_done, cmd.id],
                    )?;
                    touch_task(tx, subtask.task_id)?;
                    Ok(subtask)
                })
                .await?;
            Ok(serde_json::to_value(subtask)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
