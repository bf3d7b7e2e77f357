//! AddSubtask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{NewSubtask, OrderedCollection, SubtaskKind};
use crate::outcome::logged;
use crate::task::{board_of_task, touch_task};
use crate::types::{Capability, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append a subtask to a task's checklist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddSubtask {
    pub task_id: TaskId,
    pub title: String,
}

operation!(AddSubtask, verb = "add", noun = "subtask", description = "Append a subtask to a task");

impl AddSubtask {
    pub fn new(task_id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddSubtask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let title = self.title.trim().to_string();
            if title.is_empty() {
                return Err(KanbanError::validation("title", "title is required"));
            }
            let task = self.task_id;
            let gate = ctx.gate();

            let subtask = ctx
                .write(move |tx| {
                    let board = board_of_task(tx, task)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "add subtask")?;
                    let id = OrderedCollection::<SubtaskKind>::new(tx).append(task, &NewSubtask { title })?;
                    touch_task(tx, task)?;
                    super::read_subtask(tx, id)
                })
                .await?;
            Ok(serde_json::to_value(subtask)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"].as_i64().map(|id| vec![id.to_string()]).unwrap_or_default()
    }
}
