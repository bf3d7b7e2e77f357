//! ListSubtasks command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::task::board_of_task;
use crate::types::{Capability, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a task's subtasks in order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListSubtasks {
    pub task_id: TaskId,
}

operation!(ListSubtasks, verb = "list", noun = "subtasks", description = "List a task's subtasks");

impl ListSubtasks {
    pub fn new(task_id: impl Into<TaskId>) -> Self {
        Self { task_id: task_id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListSubtasks {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let task = self.task_id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let subtasks = ctx
                .read(move |tx| {
                    let board = board_of_task(tx, task)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "list subtasks")?;
                    super::subtasks_of(tx, task)
                })
                .await?;
            let done = subtasks.iter().filter(|s| s.is_done).count();
            Ok(json!({ "subtasks": subtasks, "count": subtasks.len(), "done": done }))
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
    async fn test_list_subtasks() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let first = AddSubtask::new(task, "one").execute(&fx.owner).await.into_result().unwrap();
        AddSubtask::new(task, "two").execute(&fx.owner).await.into_result().unwrap();
        UpdateSubtask::new(first["id"].as_i64().unwrap())
            .with_done(true)
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();

        let listed = ListSubtasks::new(task).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(listed["count"], 2);
        assert_eq!(listed["done"], 1);
        assert_eq!(listed["subtasks"][1]["title"], "two");
    }
}
