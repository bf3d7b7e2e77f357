//! ListAssignees command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{Capability, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List the users assigned to a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListAssignees {
    pub id: TaskId,
}

operation!(ListAssignees, verb = "list", noun = "assignees", description = "List a task's assignees");

impl ListAssignees {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListAssignees {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let id = self.id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let assignees = ctx
                .read(move |tx| {
                    let board = super::board_of_task(tx, id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "list assignees")?;
                    super::assignees_of(tx, id)
                })
                .await?;
            let count = assignees.len();
            Ok(json!({ "assignees": assignees, "count": count }))
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AssignTask;
    use crate::test_support::{add_task, fixture};

    #[tokio::test]
    async fn test_list_assignees() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let empty = ListAssignees::new(task).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(empty["count"], 0);

        AssignTask::new(task, fx.owner_id).execute(&fx.owner).await.into_result().unwrap();
        let listed = ListAssignees::new(task).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["assignees"][0]["email"], "owner@example.com");
    }
}
