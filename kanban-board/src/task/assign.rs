//! AssignTask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TaskId, UserId};
use crate::user::read_user;
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Assign a board member to a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignTask {
    pub id: TaskId,
    pub user_id: UserId,
}

operation!(AssignTask, verb = "assign", noun = "task", description = "Assign a board member to a task");

impl AssignTask {
    pub fn new(id: impl Into<TaskId>, user_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AssignTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let assignees = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, cmd.id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "assign task")?;
                    read_user(tx, cmd.user_id)?;
                    if gate.role_of(tx, cmd.user_id, board)?.is_none() {
                        return Err(KanbanError::validation("user_id", "assignee must be a board member"));
                    }

                    let inserted = tx.execute(
                        "INSERT OR IGNORE INTO task_assignees (task_id, user_id, assigned_at) VALUES (?1, ?2, ?3)",
                        params![cmd.id, cmd.user_id, Utc::now()],
                    )?;
                    if inserted == 0 {
                        return Err(KanbanError::conflict("assignee", format!("user {} is already assigned", cmd.user_id)));
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
    use crate::test_support::{add_task, add_user, fixture, join};
    use crate::types::Role;

    #[tokio::test]
    async fn test_assign_member() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let member = add_user(&fx.ctx, "m@example.com").await;
        join(&fx.ctx, fx.board, member, Role::Member).await;

        let out = AssignTask::new(task, member).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(out["assignees"][0]["id"], member.get());

        let again = AssignTask::new(task, member).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(again, KanbanError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_assign_non_member_rejected() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let stranger = add_user(&fx.ctx, "s@example.com").await;

        let err = AssignTask::new(task, stranger).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::Validation { .. }));

        let missing = AssignTask::new(task, 404).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(missing, KanbanError::NotFound { .. }));
    }
}
