//! TagTask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::tag::read_tag;
use crate::types::{Capability, TagId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Attach a tag to a task. Attaching twice is a no-op.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagTask {
    pub id: TaskId,
    pub tag_id: TagId,
}

operation!(TagTask, verb = "tag", noun = "task", description = "Attach a tag to a task");

impl TagTask {
    pub fn new(id: impl Into<TaskId>, tag_id: impl Into<TagId>) -> Self {
        Self {
            id: id.into(),
            tag_id: tag_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for TagTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let tags = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, cmd.id)?;
                    let tag = read_tag(tx, cmd.tag_id)?;
                    if tag.board_id != board {
                        return Err(KanbanError::CrossScope {
                            from: format!("board {}", tag.board_id),
                            to: format!("board {board}"),
                        });
                    }
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "tag task")?;
                    tx.execute(
                        "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)",
                        params![cmd.id, cmd.tag_id],
                    )?;
                    super::touch_task(tx, cmd.id)?;
                    super::tags_of_task(tx, cmd.id)
                })
                .await?;
            Ok(json!({ "task_id": self.id, "tags": tags }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
