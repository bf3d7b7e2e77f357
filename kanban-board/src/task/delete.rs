//! DeleteTask command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{OrderedCollection, TaskKind};
use crate::outcome::logged;
use crate::types::{Capability, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a task with its subtasks, tag links and assignments
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTask {
    pub id: TaskId,
}

operation!(DeleteTask, verb = "delete", noun = "task", description = "Delete a task");

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let id = self.id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let column = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "delete task")?;
                    let column = OrderedCollection::<TaskKind>::new(tx).remove(id)?;
                    touch_board(tx, board)?;
                    Ok(column)
                })
                .await?;
            Ok(json!({ "deleted": true, "id": id, "column_id": column }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::GetTask;
    use crate::test_support::{add_task, fixture, task_positions};

    #[tokio::test]
    async fn test_delete_task_keeps_sibling_positions() {
        let fx = fixture().await;
        let column = fx.columns[0];
        let t1 = add_task(&fx.owner, column, "1").await;
        let t2 = add_task(&fx.owner, column, "2").await;
        let t3 = add_task(&fx.owner, column, "3").await;

        DeleteTask::new(t2).execute(&fx.owner).await.into_result().unwrap();

        assert_eq!(task_positions(&fx.ctx, column).await, vec![(t1, 1), (t3, 3)]);
        let err = GetTask::new(t2).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));
    }
}
