//! ReorderSubtasks command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{OrderedCollection, SubtaskKind};
use crate::outcome::logged;
use crate::task::{board_of_task, touch_task};
use crate::types::{Capability, SubtaskId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Rewrite subtask positions within a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderSubtasks {
    pub task_id: TaskId,
    pub order: Vec<SubtaskId>,
}

operation!(ReorderSubtasks, verb = "reorder", noun = "subtasks", description = "Reorder all subtasks of a task");

impl ReorderSubtasks {
    pub fn new(task_id: impl Into<TaskId>, order: impl IntoIterator<Item = SubtaskId>) -> Self {
        Self {
            task_id: task_id.into(),
            order: order.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ReorderSubtasks {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            if cmd.order.is_empty() {
                return Err(KanbanError::validation("order", "must not be empty"));
            }
            let gate = ctx.gate();

            ctx.write(move |tx| {
                let board = board_of_task(tx, cmd.task_id)?;
                authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "reorder subtasks")?;
                OrderedCollection::<SubtaskKind>::new(tx).reorder(cmd.task_id, &cmd.order)?;
                touch_task(tx, cmd.task_id)
            })
            .await?;
            Ok(json!({ "task_id": self.task_id, "order": self.order }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtask::{AddSubtask, ListSubtasks};
    use crate::test_support::{add_task, fixture};

    #[tokio::test]
    async fn test_reorder_subtasks() {
        let fx = fixture().await;
        let task = add_task(&fx.owner, fx.columns[0], "T").await;
        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            let added = AddSubtask::new(task, title).execute(&fx.owner).await.into_result().unwrap();
            ids.push(SubtaskId(added["id"].as_i64().unwrap()));
        }

        ReorderSubtasks::new(task, [ids[2], ids[0], ids[1]])
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();

        let listed = ListSubtasks::new(task).execute(&fx.owner).await.into_result().unwrap();
        let titles: Vec<&str> = listed["subtasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["c", "a", "b"]);

        let stale = ReorderSubtasks::new(task, [ids[0], ids[1]])
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(stale, KanbanError::InvalidMembership { .. }));
        assert!(stale.is_retryable());
    }
}
