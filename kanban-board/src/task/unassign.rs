//! UnassignTask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TaskId, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Remove an assignee from a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnassignTask {
    pub id: TaskId,
    pub user_id: UserId,
}

operation!(UnassignTask, verb = "unassign", noun = "task", description = "Remove an assignee from a task");

impl UnassignTask {
    pub fn new(id: impl Into<TaskId>, user_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UnassignTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let assignees = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, cmd.id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "unassign task")?;
                    let removed = tx.execute(
                        "DELETE FROM task_assignees WHERE task_id = ?1 AND user_id = ?2",
                        params![cmd.id, cmd.user_id],
                    )?;
                    if removed == 0 {
                        return Err(KanbanError::not_found("assignee", cmd.user_id));
                    }
                    super::touch_task(tx, cmd.id)?;
                    super::assignees_of(tx, cmd.id)
                })
                .await?;
            Ok(json!({ "task_id": self.id, "assignees": assignees }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AssignTask;
    use crate::test_support::{add_task, fixture};

    #[tokio::test]
    async fn test_unassign() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        AssignTask::new(task, fx.owner_id).execute(&fx.owner).await.into_result().unwrap();

        let out = UnassignTask::new(task, fx.owner_id).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(out["assignees"].as_array().unwrap().len(), 0);

        let err = UnassignTask::new(task, fx.owner_id).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));
    }
}
