//! GetTask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{Capability, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a task with subtasks, tags, assignees and progress
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTask {
    pub id: TaskId,
}

operation!(GetTask, verb = "get", noun = "task", description = "Get a task with its details");

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let id = self.id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let detail = ctx
                .read(move |tx| {
                    let board = super::board_of_task(tx, id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "view task")?;
                    super::task_detail(tx, super::read_task(tx, id)?)
                })
                .await?;

            let progress = detail.progress();
            let mut value = serde_json::to_value(detail)?;
            value["progress"] = serde_json::json!(progress);
            Ok(value)
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtask::{AddSubtask, UpdateSubtask};
    use crate::test_support::{add_task, fixture};

    #[tokio::test]
    async fn test_get_task_with_progress() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "Ship").await;
        let done = AddSubtask::new(task, "write").execute(&fx.owner).await.into_result().unwrap();
        AddSubtask::new(task, "review").execute(&fx.owner).await.into_result().unwrap();
        UpdateSubtask::new(done["id"].as_i64().unwrap())
            .with_done(true)
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();

        let detail = GetTask::new(task).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(detail["title"], "Ship");
        assert_eq!(detail["subtasks"].as_array().unwrap().len(), 2);
        assert_eq!(detail["progress"], 0.5);
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let fx = fixture().await;
        let err = GetTask::new(404).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));
    }
}
