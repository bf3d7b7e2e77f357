//! MoveSubtask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{MoveCoordinator, SubtaskKind};
use crate::outcome::logged;
use crate::task::touch_task;
use crate::types::{Capability, SubtaskId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Move a subtask within its task or to another task on the same board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveSubtask {
    pub id: SubtaskId,
    pub to_task_id: TaskId,
    pub new_index: Option<i64>,
}

operation!(MoveSubtask, verb = "move", noun = "subtask", description = "Move a subtask to a task at an index");

impl MoveSubtask {
    pub fn new(id: impl Into<SubtaskId>, to_task_id: impl Into<TaskId>, new_index: i64) -> Self {
        Self {
            id: id.into(),
            to_task_id: to_task_id.into(),
            new_index: Some(new_index),
        }
    }

    pub fn to_task(id: impl Into<SubtaskId>, to_task_id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            to_task_id: to_task_id.into(),
            new_index: None,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveSubtask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let outcome = ctx
                .write(move |tx| {
                    let outcome = MoveCoordinator::<SubtaskKind>::new(tx).move_record(
                        cmd.id,
                        cmd.to_task_id,
                        cmd.new_index,
                        |board| {
                            authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "move subtask")
                                .map(|_| ())
                        },
                    )?;
                    touch_task(tx, outcome.from)?;
                    if outcome.to != outcome.from {
                        touch_task(tx, outcome.to)?;
                    }
                    Ok(outcome)
                })
                .await?;
            Ok(serde_json::to_value(outcome)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
