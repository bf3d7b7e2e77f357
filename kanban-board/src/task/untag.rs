//! UntagTask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TagId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Detach a tag from a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UntagTask {
    pub id: TaskId,
    pub tag_id: TagId,
}

operation!(UntagTask, verb = "untag", noun = "task", description = "Detach a tag from a task");

impl UntagTask {
    pub fn new(id: impl Into<TaskId>, tag_id: impl Into<TagId>) -> Self {
        Self {
            id: id.into(),
            tag_id: tag_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UntagTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let tags = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, cmd.id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "untag task")?;
                    let removed = tx.execute(
                        "DELETE FROM task_tags WHERE task_id = ?1 AND tag_id = ?2",
                        params![cmd.id, cmd.tag_id],
                    )?;
                    if removed == 0 {
                        return Err(KanbanError::not_found("task tag", cmd.tag_id));
                    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::AddTag;
    use crate::task::TagTask;
    use crate::test_support::{add_task, fixture};

    #[tokio::test]
    async fn test_untag() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let tag = AddTag::new(fx.board, "ux").execute(&fx.owner).await.into_result().unwrap();
        let tag_id = tag["id"].as_i64().unwrap();
        TagTask::new(task, tag_id).execute(&fx.owner).await.into_result().unwrap();

        let out = UntagTask::new(task, tag_id).execute(&fx.owner).await.into_result().unwrap();
        assert!(out["tags"].as_array().unwrap().is_empty());

        let err = UntagTask::new(task, tag_id).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));
    }
}
